//! Fluent construction of caches.
//!
//! [`CacheBuilder`] assembles a [`CacheConfig`] step by step and builds it
//! against the linked engines (or a caller-supplied [`Registry`]).
//!
//! `build` gives a single-owner [`Cache`]; `build_shared` gives a
//! [`SharedCache`] whose clones can be handed to other threads.
//!
//! ## Example
//!
//! ```rust
//! use std::thread;
//!
//! use cachelayer::builder::CacheBuilder;
//! use cachelayer::item::Item;
//! use cachelayer::registry::PolicyKind;
//!
//! let mut cache = CacheBuilder::new()
//!     .level(PolicyKind::Arc, 256)
//!     .level(PolicyKind::Fifo, 4096)
//!     .build_shared::<String>()
//!     .unwrap();
//!
//! let mut writer = cache.clone();
//! thread::spawn(move || {
//!     writer
//!         .put(Item::new("greeting", "hello".to_string()).unwrap())
//!         .unwrap();
//! })
//! .join()
//! .unwrap();
//!
//! assert_eq!(cache.get("greeting").unwrap().unwrap().value(), "hello");
//! ```

use crate::cache::{Cache, SharedCache};
use crate::config::{CacheConfig, LevelConfig};
use crate::error::Result;
use crate::registry::{PolicyKind, Registry};

/// Builder for [`Cache`] instances.
#[derive(Debug, Clone, Default)]
pub struct CacheBuilder {
    levels: Vec<LevelConfig>,
    concurrent: bool,
}

impl CacheBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing layout.
    pub fn from_config(config: CacheConfig) -> Self {
        Self {
            levels: config.levels,
            concurrent: config.concurrent,
        }
    }

    /// Appends a level; the first level added is queried first.
    pub fn level(mut self, policy: PolicyKind, capacity: usize) -> Self {
        self.levels.push(LevelConfig { policy, capacity });
        self
    }

    pub fn config(&self) -> CacheConfig {
        CacheConfig {
            levels: self.levels.clone(),
            concurrent: self.concurrent,
        }
    }

    /// Builds a single-owner cache with every engine compiled into this crate.
    pub fn build<V>(self) -> Result<Cache<V>>
    where
        V: Clone + Send + 'static,
    {
        self.build_with(&Registry::linked())
    }

    /// Builds with the engines in `registry`.
    pub fn build_with<V>(self, registry: &Registry<V>) -> Result<Cache<V>>
    where
        V: Clone + Send + 'static,
    {
        self.config().build(registry)
    }

    /// Builds a cache whose clones share one container across threads.
    pub fn build_shared<V>(self) -> Result<SharedCache<V>>
    where
        V: Clone + Send + 'static,
    {
        self.build_shared_with(&Registry::linked())
    }

    /// Shared variant of [`build_with`](Self::build_with).
    pub fn build_shared_with<V>(mut self, registry: &Registry<V>) -> Result<SharedCache<V>>
    where
        V: Clone + Send + 'static,
    {
        self.concurrent = true;
        self.config().build_shared(registry)
    }
}
