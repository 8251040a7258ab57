// ==============================================
// MULTILEVEL CONTAINER TESTS (integration)
// ==============================================
//
// Tier behaviour observed through `Cache` on top of real engines.
#![cfg(all(feature = "policy-fifo", feature = "policy-lfu"))]

use cachelayer::cache::Cache;
use cachelayer::decorator::MultilevelContainer;
use cachelayer::error::{CacheError, Result};
use cachelayer::item::Item;
use cachelayer::policy::{FifoContainer, LfuContainer};
use cachelayer::traits::{BoxedContainer, Container};

fn item(key: &str, value: u32) -> Item<u32> {
    Item::new(key, value).unwrap()
}

fn two_levels() -> MultilevelContainer<u32> {
    MultilevelContainer::new(vec![FifoContainer::boxed(2), LfuContainer::boxed(8)]).unwrap()
}

/// Level that refuses every write.
struct ReadOnlyTier;

impl Container<u32> for ReadOnlyTier {
    fn clear(&mut self) -> Result<()> {
        Err(CacheError::backend("tier is read-only"))
    }

    fn remove(&mut self, _key: &str) -> Result<()> {
        Err(CacheError::backend("tier is read-only"))
    }

    fn put(&mut self, _item: Item<u32>) -> Result<()> {
        Err(CacheError::backend("tier is read-only"))
    }

    fn get(&mut self, _key: &str) -> Result<Option<Item<u32>>> {
        Ok(None)
    }
}

#[test]
fn lower_level_hit_is_not_copied_upwards() {
    let mut levels = two_levels();
    levels
        .level_mut(1)
        .unwrap()
        .put(item("a", 1))
        .unwrap();

    let (level, found) = levels.get_with_level("a").unwrap().unwrap();
    assert_eq!(level, 1);
    assert_eq!(*found.value(), 1);
    assert!(levels.level_mut(0).unwrap().get("a").unwrap().is_none());
}

#[test]
fn cache_put_reaches_every_level() {
    let mut cache = Cache::new(two_levels());
    cache.put(item("b", 2)).unwrap();

    let levels = cache.container_mut();
    assert!(levels.level_mut(0).unwrap().get("b").unwrap().is_some());
    assert!(levels.level_mut(1).unwrap().get("b").unwrap().is_some());
}

#[test]
fn first_level_eviction_falls_back_to_second() {
    let mut cache = Cache::new(two_levels());
    for (i, key) in ["a", "b", "c"].into_iter().enumerate() {
        cache.put(item(key, i as u32)).unwrap();
    }

    // FIFO(2) on top dropped "a"; LFU(8) underneath still has it.
    let (level, _) = cache.container_mut().get_with_level("a").unwrap().unwrap();
    assert_eq!(level, 1);
    assert_eq!(*cache.get("a").unwrap().unwrap().value(), 0);
}

#[test]
fn remove_and_clear_cover_every_level() {
    let mut cache = Cache::new(two_levels());
    cache.put(item("a", 1)).unwrap();
    cache.put(item("b", 2)).unwrap();

    cache.remove("a").unwrap();
    assert!(cache.container_mut().get_with_level("a").unwrap().is_none());

    cache.clear().unwrap();
    assert!(cache.container_mut().get_with_level("b").unwrap().is_none());
}

#[test]
fn failing_level_aborts_without_rollback() {
    let levels: Vec<BoxedContainer<u32>> = vec![
        FifoContainer::boxed(4),
        Box::new(ReadOnlyTier),
        LfuContainer::boxed(4),
    ];
    let mut cache = Cache::new(MultilevelContainer::new(levels).unwrap());

    let err = cache.put(item("a", 1)).unwrap_err();
    assert_eq!(err.operation(), Some("put"));
    assert!(matches!(err.root_cause(), CacheError::Backend(_)));

    let levels = cache.container_mut();
    assert!(levels.level_mut(0).unwrap().get("a").unwrap().is_some());
    assert!(levels.level_mut(2).unwrap().get("a").unwrap().is_none());
}

#[test]
fn empty_chain_is_rejected() {
    let err = MultilevelContainer::<u32>::new(Vec::new()).unwrap_err();
    assert!(err.is_validation());
}
