//! # Container Capability
//!
//! Every eviction engine and every decorator in this crate implements the
//! same four-operation capability, so they compose freely:
//!
//! ```text
//!   Cache ──► ConcurrentContainer ──► MultilevelContainer ──┬──► ArcContainer   (L1)
//!                                                           └──► FifoContainer  (L2)
//! ```
//!
//! ```text
//!   ┌─────────────────────────────────────────────────────────────┐
//!   │                     Container<V>                            │
//!   │                                                             │
//!   │  clear(&mut)                      → Result<()>              │
//!   │  remove(&mut, &str)               → Result<()>              │
//!   │  put(&mut, Item<V>)               → Result<()>              │
//!   │  get(&mut, &str)                  → Result<Option<Item<V>>> │
//!   │  put_touched(&mut, Item<V>)       → Result<()>  (= put)     │
//!   └─────────────────────────────────────────────────────────────┘
//!   ┌─────────────────────────────────────────────────────────────┐
//!   │                  ReadOnlyContainer                          │
//!   │  contains(&, &str) → bool   len → usize   capacity → usize  │
//!   └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Semantics
//!
//! - `get` returning `Ok(None)` is a miss, never an error.
//! - `get` is allowed to mutate engine state (ARC promotion, LFU counting),
//!   which is why it takes `&mut self`.
//! - `get` hands back an owned copy of the stored item; the stored one can
//!   only be changed through the container.
//! - `put_touched` is the write-back the [`Cache`](crate::cache::Cache) issues
//!   after stamping a successful read. Engines whose `get` already recorded
//!   the access override it so one read counts as one access. Every engine
//!   in this crate drops the write-back for a key that is no longer resident.
//!
//! ## Thread Safety
//!
//! Bare engines are single-owner structures. Wrap them in
//! [`ConcurrentContainer`](crate::decorator::concurrent::ConcurrentContainer)
//! to share them between threads.

use crate::error::Result;
use crate::item::Item;

/// Storage capability implemented by every engine and decorator.
///
/// # Example
///
/// ```
/// use cachelayer::item::Item;
/// use cachelayer::policy::fifo::FifoContainer;
/// use cachelayer::traits::Container;
///
/// fn warm<C: Container<u32>>(container: &mut C, keys: &[&str]) -> cachelayer::error::Result<()> {
///     for (i, key) in keys.iter().enumerate() {
///         container.put(Item::new(*key, i as u32)?)?;
///     }
///     Ok(())
/// }
///
/// let mut fifo = FifoContainer::new(8);
/// warm(&mut fifo, &["a", "b"]).unwrap();
/// assert_eq!(fifo.get("b").unwrap().map(|i| *i.value()), Some(1));
/// ```
pub trait Container<V> {
    /// Removes every item.
    fn clear(&mut self) -> Result<()>;

    /// Removes the item stored under `key`; removing a missing key succeeds.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Inserts or replaces the item stored under `item.key()`.
    fn put(&mut self, item: Item<V>) -> Result<()>;

    /// Looks up the item stored under `key`.
    fn get(&mut self, key: &str) -> Result<Option<Item<V>>>;

    /// Stores an item that was just returned by [`get`](Container::get) and
    /// touched by the cache. Containers that can tell should ignore it when
    /// the key has left since the read.
    fn put_touched(&mut self, item: Item<V>) -> Result<()> {
        self.put(item)
    }
}

/// Boxed, sendable container used wherever containers are composed at runtime.
pub type BoxedContainer<V> = Box<dyn Container<V> + Send>;

impl<V, C> Container<V> for Box<C>
where
    C: Container<V> + ?Sized,
{
    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn put(&mut self, item: Item<V>) -> Result<()> {
        (**self).put(item)
    }

    fn get(&mut self, key: &str) -> Result<Option<Item<V>>> {
        (**self).get(key)
    }

    fn put_touched(&mut self, item: Item<V>) -> Result<()> {
        (**self).put_touched(item)
    }
}

/// Side-effect-free inspection of an engine.
pub trait ReadOnlyContainer {
    /// Returns `true` if a live (non-ghost) item is stored under `key`.
    fn contains(&self, key: &str) -> bool;

    /// Number of live items.
    fn len(&self) -> usize;

    /// Configured capacity; `0` means unbounded for engines that allow it.
    fn capacity(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
