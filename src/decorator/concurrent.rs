//! Thread-safe wrapper around any container.
//!
//! ## Architecture
//!
//! ```text
//!   thread A ─► ConcurrentContainer ─┐
//!   thread B ─► ConcurrentContainer ─┼─► Arc<Mutex<C>> ─► C: Container<V>
//!   thread C ─► ConcurrentContainer ─┘
//! ```
//!
//! Every operation, `get` included, takes the same exclusive lock. Engines
//! reorder lists, bump counters or move ghosts on `get`, so a shared read
//! lock would race with itself.
//!
//! The handle is cheap to clone; clones share one inner container.
//!
//! A [`Cache`](crate::cache::Cache) issues `get` and its write-back as two
//! separate lock acquisitions. Another thread can run between them; a key it
//! removes is not brought back by the write-back.
//!
//! ## Example Usage
//!
//! ```
//! use std::thread;
//!
//! use cachelayer::decorator::concurrent::ConcurrentContainer;
//! use cachelayer::item::Item;
//! use cachelayer::policy::fifo::FifoContainer;
//! use cachelayer::traits::{Container, ReadOnlyContainer};
//!
//! let shared = ConcurrentContainer::new(FifoContainer::new(16));
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let mut handle = shared.clone();
//!         thread::spawn(move || {
//!             handle.put(Item::new(format!("t{t}"), t).unwrap()).unwrap();
//!         })
//!     })
//!     .collect();
//! for h in handles {
//!     h.join().unwrap();
//! }
//!
//! assert_eq!(shared.len(), 4);
//! ```

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use crate::item::Item;
use crate::traits::{Container, ReadOnlyContainer};

/// Shared handle that serializes every operation on the wrapped container.
#[derive(Debug)]
pub struct ConcurrentContainer<C> {
    inner: Arc<Mutex<C>>,
}

impl<C> ConcurrentContainer<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Runs `f` with exclusive access to the wrapped container.
    pub fn with_inner<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        let mut inner = self.inner.lock();
        f(&mut inner)
    }

    /// Number of handles sharing the wrapped container.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Returns the wrapped container if this is the last handle.
    pub fn try_into_inner(self) -> std::result::Result<C, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl<C> Clone for ConcurrentContainer<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V, C> Container<V> for ConcurrentContainer<C>
where
    C: Container<V>,
{
    fn clear(&mut self) -> Result<()> {
        self.inner.lock().clear()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.inner.lock().remove(key)
    }

    fn put(&mut self, item: Item<V>) -> Result<()> {
        self.inner.lock().put(item)
    }

    fn get(&mut self, key: &str) -> Result<Option<Item<V>>> {
        self.inner.lock().get(key)
    }

    fn put_touched(&mut self, item: Item<V>) -> Result<()> {
        self.inner.lock().put_touched(item)
    }
}

impl<C> ReadOnlyContainer for ConcurrentContainer<C>
where
    C: ReadOnlyContainer,
{
    fn contains(&self, key: &str) -> bool {
        self.inner.lock().contains(key)
    }

    fn len(&self) -> usize {
        self.inner.lock().len()
    }

    fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }
}
