#![no_main]

use cachelayer::builder::CacheBuilder;
use cachelayer::item::Item;
use cachelayer::registry::PolicyKind;
use libfuzzer_sys::fuzz_target;

// Arbitrary operations on a two-level cache whose engines and capacities are
// chosen by the input. A hit must always return the last value written.
fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let engines = [PolicyKind::Fifo, PolicyKind::Mru, PolicyKind::Lfu, PolicyKind::Arc];
    let upper = engines[data[0] as usize % engines.len()];
    let lower = engines[data[1] as usize % engines.len()];
    let Ok(mut cache) = CacheBuilder::new()
        .level(upper, 1 + data[2] as usize % 8)
        .level(lower, 1 + data[3] as usize % 32)
        .build::<u16>()
    else {
        return;
    };

    let mut last = [None::<u16>; 32];
    for (step, pair) in data[4..].chunks_exact(2).enumerate() {
        let slot = (pair[1] % 32) as usize;
        let key = format!("k{slot}");
        match pair[0] % 4 {
            0 => {
                let value = step as u16;
                cache.put(Item::new(key, value).unwrap()).unwrap();
                last[slot] = Some(value);
            },
            1 => {
                if let Some(item) = cache.get(&key).unwrap() {
                    assert_eq!(Some(*item.value()), last[slot]);
                }
            },
            2 => {
                cache.remove(&key).unwrap();
                last[slot] = None;
            },
            3 => {
                cache.clear().unwrap();
                last = [None; 32];
            },
            _ => unreachable!(),
        }
    }
});
