//! Insertion-ordered core shared by the FIFO and MRU engines.
//!
//! Both engines keep items in one [`KeyedList`] with the most recently
//! inserted (or updated) item at the front. They only disagree on which end
//! gives up an item when a new key arrives at capacity:
//!
//! ```text
//!   front (newest) ─► [C] ◄──► [B] ◄──► [A] ◄── back (oldest)
//!                      ▲                  ▲
//!                 MRU discards       FIFO discards
//! ```

use crate::ds::KeyedList;
use crate::item::Item;

/// End of the sequence an engine discards from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DiscardEnd {
    /// Least recently inserted/updated.
    Back,
    /// Most recently inserted/updated.
    Front,
}

#[derive(Debug)]
pub(crate) struct SequenceCore<V> {
    list: KeyedList<String, Item<V>>,
    capacity: usize,
    discard: DiscardEnd,
    policy: &'static str,
}

impl<V> SequenceCore<V> {
    pub(crate) fn new(capacity: usize, discard: DiscardEnd, policy: &'static str) -> Self {
        Self {
            list: KeyedList::with_capacity(capacity),
            capacity,
            discard,
            policy,
        }
    }

    pub(crate) fn get(&self, key: &str) -> Option<&Item<V>> {
        self.list.get(key)
    }

    /// Inserts at the front. An existing key counts as a fresh insertion; a
    /// new key at capacity first discards one item from the configured end.
    pub(crate) fn put(&mut self, item: Item<V>) {
        if self.capacity > 0 && self.list.len() >= self.capacity && !self.list.contains(item.key())
        {
            self.discard_one();
        }
        self.list.push_front(item.key().to_owned(), item);
    }

    /// Stores a touched item back at the front. A key that left the list
    /// since it was read stays gone.
    pub(crate) fn refresh(&mut self, item: Item<V>) {
        if self.list.contains(item.key()) {
            self.list.push_front(item.key().to_owned(), item);
        } else {
            tracing::trace!(policy = self.policy, key = item.key(), "dropped write-back");
        }
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<Item<V>> {
        self.list.remove(key)
    }

    pub(crate) fn clear(&mut self) {
        self.list.clear();
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.list.contains(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.list.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Keys from newest to oldest.
    pub(crate) fn keys(&self) -> impl Iterator<Item = &str> {
        self.list.keys().map(String::as_str)
    }

    fn discard_one(&mut self) {
        let evicted = match self.discard {
            DiscardEnd::Back => self.list.pop_back(),
            DiscardEnd::Front => self.list.pop_front(),
        };
        if let Some((key, _)) = evicted {
            tracing::trace!(policy = self.policy, key = %key, "discarded item");
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub(crate) fn debug_validate_invariants(&self) {
        self.list.debug_validate_invariants();
        if self.capacity > 0 {
            assert!(
                self.list.len() <= self.capacity,
                "{} holds {} items over capacity {}",
                self.policy,
                self.list.len(),
                self.capacity
            );
        }
        for (key, item) in self.list.iter() {
            assert_eq!(key, item.key(), "index key differs from item key");
        }
    }
}
