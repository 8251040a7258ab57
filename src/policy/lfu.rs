//! # LFU (Least Frequently Used) Engine
//!
//! Keeps items in an [`IndexedMinHeap`] ordered by access count. The key
//! index stored beside the heap lets `get` bump a count and fix the heap in
//! O(log n) without any stale-entry bookkeeping.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────────────────────────┐
//!   │                     LfuContainer<V>                         │
//!   │                                                             │
//!   │   index: FxHashMap<String, usize>                           │
//!   │       "a" → 2    "b" → 0    "c" → 1                         │
//!   │                                                             │
//!   │   entries (binary min-heap on count):                       │
//!   │                    [0] (b, 0)   ← eviction candidate        │
//!   │                   /          \                              │
//!   │            [1] (c, 1)     [2] (a, 4)                        │
//!   │                                                             │
//!   │   capacity: usize  (0 = unbounded)                          │
//!   └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation | Time     | Notes                                         |
//! |-----------|----------|-----------------------------------------------|
//! | `get`     | O(log n) | Increments the count                          |
//! | `put`     | O(log n) | Existing key: value replaced, count preserved |
//! | `remove`  | O(log n) |                                               |
//! | `clear`   | O(n)     |                                               |
//!
//! New keys enter with count zero. Ties between equal counts are broken by
//! heap position, not by insertion order.

use crate::ds::IndexedMinHeap;
use crate::error::Result;
use crate::item::Item;
use crate::traits::{BoxedContainer, Container, ReadOnlyContainer};

/// Least-frequently-used eviction.
#[derive(Debug)]
pub struct LfuContainer<V> {
    heap: IndexedMinHeap<String, Item<V>>,
    capacity: usize,
}

impl<V> LfuContainer<V> {
    /// Creates an LFU engine holding at most `capacity` items (`0` = unbounded).
    pub fn new(capacity: usize) -> Self {
        Self {
            heap: IndexedMinHeap::with_capacity(capacity),
            capacity,
        }
    }

    /// Access count recorded for `key`.
    pub fn frequency(&self, key: &str) -> Option<u64> {
        self.heap.count(key)
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.heap.debug_validate_invariants();
        if self.capacity > 0 {
            assert!(self.heap.len() <= self.capacity);
        }
    }
}

impl<V> LfuContainer<V>
where
    V: Clone + Send + 'static,
{
    /// Registry factory.
    pub fn boxed(capacity: usize) -> BoxedContainer<V> {
        Box::new(Self::new(capacity))
    }
}

impl<V: Clone> Container<V> for LfuContainer<V> {
    fn clear(&mut self) -> Result<()> {
        self.heap.clear();
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.heap.remove(key);
        Ok(())
    }

    fn put(&mut self, item: Item<V>) -> Result<()> {
        if self.heap.contains(item.key()) {
            self.heap.insert(item.key().to_owned(), item);
            return Ok(());
        }

        if self.capacity > 0
            && self.heap.len() >= self.capacity
            && let Some((key, _, count)) = self.heap.pop_min()
        {
            tracing::trace!(policy = "lfu", key = %key, count, "discarded item");
        }
        self.heap.insert(item.key().to_owned(), item);
        Ok(())
    }

    fn get(&mut self, key: &str) -> Result<Option<Item<V>>> {
        if self.heap.increment(key).is_none() {
            return Ok(None);
        }
        Ok(self.heap.get(key).cloned())
    }

    /// `get` already counted the access; a key evicted or removed since then
    /// is not brought back.
    fn put_touched(&mut self, item: Item<V>) -> Result<()> {
        if self.heap.contains(item.key()) {
            self.heap.insert(item.key().to_owned(), item);
        }
        Ok(())
    }
}

impl<V> ReadOnlyContainer for LfuContainer<V> {
    fn contains(&self, key: &str) -> bool {
        self.heap.contains(key)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(key: &str, value: i32) -> Item<i32> {
        Item::new(key, value).unwrap()
    }

    // ==============================================
    // Counting
    // ==============================================

    mod counting {
        use super::*;

        #[test]
        fn new_key_starts_at_zero() {
            let mut lfu = LfuContainer::new(4);
            lfu.put(item("a", 1)).unwrap();
            assert_eq!(lfu.frequency("a"), Some(0));
        }

        #[test]
        fn get_increments() {
            let mut lfu = LfuContainer::new(4);
            lfu.put(item("a", 1)).unwrap();
            lfu.get("a").unwrap();
            lfu.get("a").unwrap();
            assert_eq!(lfu.frequency("a"), Some(2));
        }

        #[test]
        fn get_missing_does_not_create_entry() {
            let mut lfu: LfuContainer<i32> = LfuContainer::new(4);
            assert!(lfu.get("a").unwrap().is_none());
            assert_eq!(lfu.frequency("a"), None);
            assert!(lfu.is_empty());
        }

        #[test]
        fn put_existing_replaces_value_keeps_count() {
            let mut lfu = LfuContainer::new(4);
            lfu.put(item("a", 1)).unwrap();
            lfu.get("a").unwrap();
            lfu.get("a").unwrap();
            lfu.put(item("a", 7)).unwrap();

            assert_eq!(lfu.frequency("a"), Some(2));
            assert_eq!(*lfu.get("a").unwrap().unwrap().value(), 7);
        }

        #[test]
        fn remove_forgets_count() {
            let mut lfu = LfuContainer::new(4);
            lfu.put(item("a", 1)).unwrap();
            lfu.get("a").unwrap();
            lfu.remove("a").unwrap();
            lfu.put(item("a", 1)).unwrap();
            assert_eq!(lfu.frequency("a"), Some(0));
        }

        #[test]
        fn write_back_keeps_count() {
            let mut lfu = LfuContainer::new(4);
            lfu.put(item("a", 1)).unwrap();
            let mut got = lfu.get("a").unwrap().unwrap();
            *got.value_mut() = 9;
            lfu.put_touched(got).unwrap();

            assert_eq!(lfu.frequency("a"), Some(1));
            assert_eq!(*lfu.heap.get("a").unwrap().value(), 9);
        }

        #[test]
        fn write_back_after_remove_is_dropped() {
            let mut lfu = LfuContainer::new(4);
            lfu.put(item("a", 1)).unwrap();
            let got = lfu.get("a").unwrap().unwrap();
            lfu.remove("a").unwrap();
            lfu.put_touched(got).unwrap();

            assert!(!lfu.contains("a"));
            assert_eq!(lfu.frequency("a"), None);
        }
    }

    // ==============================================
    // Eviction
    // ==============================================

    mod eviction {
        use super::*;

        #[test]
        fn least_accessed_is_evicted() {
            let mut lfu = LfuContainer::new(2);
            lfu.put(item("a", 1)).unwrap();
            lfu.put(item("b", 2)).unwrap();
            lfu.get("a").unwrap();
            lfu.get("a").unwrap();
            lfu.put(item("c", 3)).unwrap();

            assert!(lfu.contains("a"));
            assert!(!lfu.contains("b"));
            assert!(lfu.contains("c"));
            lfu.debug_validate_invariants();
        }

        #[test]
        fn update_at_capacity_does_not_evict() {
            let mut lfu = LfuContainer::new(2);
            lfu.put(item("a", 1)).unwrap();
            lfu.put(item("b", 2)).unwrap();
            lfu.put(item("b", 3)).unwrap();
            assert_eq!(lfu.len(), 2);
            assert!(lfu.contains("a"));
        }

        #[test]
        fn newcomer_can_be_next_victim() {
            let mut lfu = LfuContainer::new(2);
            lfu.put(item("a", 1)).unwrap();
            lfu.put(item("b", 2)).unwrap();
            lfu.get("a").unwrap();
            lfu.get("b").unwrap();
            lfu.put(item("c", 3)).unwrap();
            lfu.put(item("d", 4)).unwrap();

            assert!(lfu.contains("d"));
            assert!(!lfu.contains("c"));
            assert!(lfu.contains("a") ^ lfu.contains("b"));
            assert_eq!(lfu.len(), 2);
        }

        #[test]
        fn zero_capacity_is_unbounded() {
            let mut lfu = LfuContainer::new(0);
            for i in 0..50 {
                lfu.put(item(&format!("k{i}"), i)).unwrap();
            }
            assert_eq!(lfu.len(), 50);
            lfu.debug_validate_invariants();
        }

        #[test]
        fn clear_empties() {
            let mut lfu = LfuContainer::new(2);
            lfu.put(item("a", 1)).unwrap();
            lfu.clear().unwrap();
            assert!(lfu.is_empty());
            assert_eq!(lfu.capacity(), 2);
        }
    }
}
