//! cachelayer: an embeddable caching layer with pluggable eviction engines.
//!
//! ```text
//!   Cache<V>  (validation, lazy expiration, touch + write-back)
//!     └── Container<V>
//!           ├── ConcurrentContainer   (exclusive lock per operation)
//!           ├── MultilevelContainer   (ordered tiers, first hit wins)
//!           └── engines: FIFO · MRU · LFU · ARC
//! ```
//!
//! Start with [`builder::CacheBuilder`] or [`config::CacheConfig`] for a
//! ready-made stack, or wrap any engine in [`cache::Cache`] directly.

pub mod builder;
pub mod cache;
pub mod codec;
pub mod config;
pub mod decorator;
pub mod dependency;
pub mod ds;
pub mod error;
pub mod item;
pub mod policy;
pub mod prelude;
pub mod registry;
pub mod traits;

pub use crate::cache::{Cache, SharedCache};
pub use crate::error::{CacheError, Result};
pub use crate::item::Item;
