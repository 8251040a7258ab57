#![no_main]

use cachelayer::item::Item;
use cachelayer::policy::ArcContainer;
use cachelayer::traits::{Container, ReadOnlyContainer};
use libfuzzer_sys::fuzz_target;

// Arbitrary put/get/touch/remove/clear sequences on the ARC engine, checking
// list bounds and key disjointness after every step.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let capacity = (data[0] as usize) % 33;
    let mut arc: ArcContainer<u8> = ArcContainer::new(capacity);

    for pair in data[1..].chunks_exact(2) {
        let key = format!("k{}", pair[1] % 64);
        match pair[0] % 5 {
            0 => {
                let _ = arc.put(Item::new(key, pair[1]).unwrap());
            },
            1 => {
                let _ = arc.get(&key);
            },
            2 => {
                if let Ok(Some(item)) = arc.get(&key) {
                    let _ = arc.put_touched(item);
                }
            },
            3 => {
                let _ = arc.remove(&key);
            },
            4 => {
                let _ = arc.clear();
            },
            _ => unreachable!(),
        }

        arc.debug_validate_invariants();
        assert!(arc.len() <= capacity);
        assert!(arc.p_value() <= capacity);
    }
});
