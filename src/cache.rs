//! Cache orchestrator.
//!
//! [`Cache`] owns one container (an engine or a decorator stack) and adds key
//! validation, lazy expiration and access tracking on top of it.
//!
//! ## Read Path
//!
//! ```text
//!   get(key)
//!     │
//!     ├─ key empty?            → Err(Validation)
//!     ├─ container.get(key)    → Err(e)  ⇒ Err(Storage{"get", key, e})
//!     │     │
//!     │     ├─ None            → Ok(None)
//!     │     │
//!     │     ├─ expired         → container.remove(key)   (purge on access)
//!     │     │                    → Ok(None)
//!     │     │
//!     │     └─ live            → item.touch()
//!     │                          container.put_touched(item.clone())
//!     │                          → Ok(Some(item))
//! ```
//!
//! Expired items are only purged when a read finds them; nothing sweeps the
//! container in the background.
//!
//! The write-back after a touch is what makes recency visible to engines that
//! only reorder on `put` (FIFO, MRU). Engines whose own `get` already counted
//! the access override [`Container::put_touched`] so a read counts once.
//!
//! The lookup and the write-back are two container calls. Behind a
//! [`ConcurrentContainer`](crate::decorator::ConcurrentContainer) they are two
//! lock acquisitions, and another thread may act on the key in between. The
//! engines only refresh a key that is still resident, so a key removed or
//! evicted in that window stays gone.
//!
//! ## Example Usage
//!
//! ```
//! use std::time::Duration;
//!
//! use cachelayer::cache::Cache;
//! use cachelayer::item::Item;
//! use cachelayer::policy::lfu::LfuContainer;
//!
//! let mut cache = Cache::new(LfuContainer::new(128));
//!
//! let session = Item::new("session:42", "alice".to_string())
//!     .unwrap()
//!     .with_sliding_expiration(Duration::from_secs(600));
//! cache.put(session).unwrap();
//!
//! let hit = cache.get("session:42").unwrap().unwrap();
//! assert_eq!(hit.value(), "alice");
//! assert!(hit.accessed_at().is_some());
//!
//! assert!(cache.get("session:7").unwrap().is_none());
//! assert!(cache.get("").is_err());
//! ```

use std::marker::PhantomData;

use crate::decorator::ConcurrentContainer;
use crate::error::{CacheError, Result, validate_key};
use crate::item::Item;
use crate::traits::{BoxedContainer, Container};

/// Front door of the library: validation, expiration and access tracking
/// over any [`Container`].
pub struct Cache<V, C = BoxedContainer<V>> {
    container: C,
    _marker: PhantomData<fn() -> V>,
}

/// Cache whose clones all operate on one locked container.
pub type SharedCache<V> = Cache<V, ConcurrentContainer<BoxedContainer<V>>>;

impl<V, C> Cache<V, C>
where
    C: Container<V>,
{
    pub fn new(container: C) -> Self {
        Self {
            container,
            _marker: PhantomData,
        }
    }

    /// Stores `item`, replacing any item under the same key.
    pub fn put(&mut self, item: Item<V>) -> Result<()> {
        validate_key(item.key())?;
        let key = item.key().to_owned();
        self.container
            .put(item)
            .map_err(|err| CacheError::storage("put", Some(&key), err))
    }

    pub fn remove(&mut self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.container
            .remove(key)
            .map_err(|err| CacheError::storage("remove", Some(key), err))
    }

    pub fn clear(&mut self) -> Result<()> {
        self.container
            .clear()
            .map_err(|err| CacheError::storage("clear", None, err))
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    pub fn into_inner(self) -> C {
        self.container
    }
}

impl<V, C> Cache<V, C>
where
    V: Clone,
    C: Container<V>,
{
    /// Returns the live item stored under `key`, or `None` on a miss or if
    /// the item had expired (it is removed in that case).
    pub fn get(&mut self, key: &str) -> Result<Option<Item<V>>> {
        validate_key(key)?;

        let Some(mut item) = self
            .container
            .get(key)
            .map_err(|err| CacheError::storage("get", Some(key), err))?
        else {
            return Ok(None);
        };

        if item.has_expired() {
            tracing::debug!(key, "purging expired item");
            self.container
                .remove(key)
                .map_err(|err| CacheError::storage("remove expired", Some(key), err))?;
            return Ok(None);
        }

        item.touch();
        self.container
            .put_touched(item.clone())
            .map_err(|err| CacheError::storage("update", Some(key), err))?;
        Ok(Some(item))
    }
}

/// Clones share the wrapped container; hand one to each thread.
impl<V, C> Clone for Cache<V, ConcurrentContainer<C>> {
    fn clone(&self) -> Self {
        Self {
            container: self.container.clone(),
            _marker: PhantomData,
        }
    }
}

impl<V, C> std::fmt::Debug for Cache<V, C>
where
    C: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("container", &self.container)
            .finish()
    }
}
