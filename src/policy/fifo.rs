//! FIFO (First In, First Out) engine.
//!
//! Evicts the item that was inserted, or last updated, the longest time ago.
//! Reads never reorder anything: eviction order is insertion/update order, not
//! access order.
//!
//! ## Architecture
//!
//! ```text
//!   index: FxHashMap<String, SlotId>      list (KeyedList<String, Item<V>>)
//!
//!   put(D) at capacity 3:
//!
//!     front ─► [C] ◄──► [B] ◄──► [A] ◄── back          A is discarded
//!     front ─► [D] ◄──► [C] ◄──► [B] ◄── back
//!
//!   put(B) (update):
//!     front ─► [B'] ◄──► [D] ◄──► [C] ◄── back         B counts as new again
//! ```
//!
//! ## Operations
//!
//! | Operation | Time | Notes                                      |
//! |-----------|------|--------------------------------------------|
//! | `get`     | O(1) | Pure lookup                                |
//! | `put`     | O(1) | Update moves to front; new key may discard |
//! | `remove`  | O(1) |                                            |
//! | `clear`   | O(n) |                                            |
//!
//! A capacity of `0` disables eviction.
//!
//! ## Example Usage
//!
//! ```
//! use cachelayer::item::Item;
//! use cachelayer::policy::fifo::FifoContainer;
//! use cachelayer::traits::{Container, ReadOnlyContainer};
//!
//! let mut fifo = FifoContainer::new(2);
//! fifo.put(Item::new("a", 1).unwrap()).unwrap();
//! fifo.put(Item::new("b", 2).unwrap()).unwrap();
//! fifo.put(Item::new("c", 3).unwrap()).unwrap();
//!
//! assert!(!fifo.contains("a"));
//! assert_eq!(fifo.len(), 2);
//! ```

use crate::error::Result;
use crate::item::Item;
use crate::policy::sequence::{DiscardEnd, SequenceCore};
use crate::traits::{BoxedContainer, Container, ReadOnlyContainer};

/// First-in, first-out eviction over a bounded insertion-ordered list.
#[derive(Debug)]
pub struct FifoContainer<V> {
    core: SequenceCore<V>,
}

impl<V> FifoContainer<V> {
    /// Creates a FIFO engine holding at most `capacity` items (`0` = unbounded).
    pub fn new(capacity: usize) -> Self {
        Self {
            core: SequenceCore::new(capacity, DiscardEnd::Back, "fifo"),
        }
    }

    /// Keys from newest to oldest.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.core.keys()
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.core.debug_validate_invariants();
    }
}

impl<V> FifoContainer<V>
where
    V: Clone + Send + 'static,
{
    /// Registry factory.
    pub fn boxed(capacity: usize) -> BoxedContainer<V> {
        Box::new(Self::new(capacity))
    }
}

impl<V: Clone> Container<V> for FifoContainer<V> {
    fn clear(&mut self) -> Result<()> {
        self.core.clear();
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.core.remove(key);
        Ok(())
    }

    fn put(&mut self, item: Item<V>) -> Result<()> {
        self.core.put(item);
        Ok(())
    }

    fn get(&mut self, key: &str) -> Result<Option<Item<V>>> {
        Ok(self.core.get(key).cloned())
    }

    fn put_touched(&mut self, item: Item<V>) -> Result<()> {
        self.core.refresh(item);
        Ok(())
    }
}

impl<V> ReadOnlyContainer for FifoContainer<V> {
    fn contains(&self, key: &str) -> bool {
        self.core.contains(key)
    }

    fn len(&self) -> usize {
        self.core.len()
    }

    fn capacity(&self) -> usize {
        self.core.capacity()
    }
}
