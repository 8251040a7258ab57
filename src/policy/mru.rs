//! MRU (Most Recently Used) engine.
//!
//! Same structure and `put`/`remove` contract as FIFO, but a new key arriving
//! at capacity discards the item at the **front**: the one most recently
//! inserted or updated. Useful for cyclic scans where the newest entry is the
//! least likely to be needed again soon.
//!
//! ```text
//!   put(C) at capacity 2:
//!
//!     front ─► [B] ◄──► [A] ◄── back        B (newest) is discarded
//!     front ─► [C] ◄──► [A] ◄── back
//! ```
//!
//! Behind a [`Cache`](crate::cache::Cache), every successful read writes the
//! touched item back with `put`, so the item just read becomes the next victim.
//!
//! A capacity of `0` disables eviction.
//!
//! ## Example Usage
//!
//! ```
//! use cachelayer::item::Item;
//! use cachelayer::policy::mru::MruContainer;
//! use cachelayer::traits::{Container, ReadOnlyContainer};
//!
//! let mut mru = MruContainer::new(2);
//! mru.put(Item::new("a", 1).unwrap()).unwrap();
//! mru.put(Item::new("b", 2).unwrap()).unwrap();
//! mru.put(Item::new("c", 3).unwrap()).unwrap();
//!
//! assert!(mru.contains("a"));
//! assert!(!mru.contains("b"));
//! assert!(mru.contains("c"));
//! ```

use crate::error::Result;
use crate::item::Item;
use crate::policy::sequence::{DiscardEnd, SequenceCore};
use crate::traits::{BoxedContainer, Container, ReadOnlyContainer};

/// Most-recently-used eviction.
#[derive(Debug)]
pub struct MruContainer<V> {
    core: SequenceCore<V>,
}

impl<V> MruContainer<V> {
    /// Creates an MRU engine holding at most `capacity` items (`0` = unbounded).
    pub fn new(capacity: usize) -> Self {
        Self {
            core: SequenceCore::new(capacity, DiscardEnd::Front, "mru"),
        }
    }

    /// Keys from most to least recently inserted/updated.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.core.keys()
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.core.debug_validate_invariants();
    }
}

impl<V> MruContainer<V>
where
    V: Clone + Send + 'static,
{
    /// Registry factory.
    pub fn boxed(capacity: usize) -> BoxedContainer<V> {
        Box::new(Self::new(capacity))
    }
}

impl<V: Clone> Container<V> for MruContainer<V> {
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

impl<V> ReadOnlyContainer for MruContainer<V> {
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
