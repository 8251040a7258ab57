//! Cache items and their expiration rules.
//!
//! ## Expiration
//!
//! ```text
//!   has_expired(now) =
//!        absolute_expiration is set  && absolute_expiration < now
//!     || sliding_expiration  > 0     && (accessed_at or created_at) + sliding < now
//!     || any dependency reports has_changed()   (checked in order, first hit wins)
//! ```
//!
//! Items are never expired eagerly. The [`Cache`](crate::cache::Cache)
//! evaluates the predicate when an item is read and purges it from the
//! container at that point.
//!
//! ## Example Usage
//!
//! ```
//! use std::time::Duration;
//! use cachelayer::item::Item;
//!
//! let item = Item::new("session:42", "alice")
//!     .unwrap()
//!     .with_sliding_expiration(Duration::from_secs(300));
//!
//! assert_eq!(item.key(), "session:42");
//! assert!(!item.has_expired());
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::dependency::Dependency;
use crate::error::{Result, validate_key};

/// A unit of cached data plus its expiration metadata.
///
/// The key is fixed at construction and never empty. `accessed_at` is only
/// advanced by the cache orchestrator when a read succeeds.
#[derive(Clone)]
pub struct Item<V> {
    key: String,
    value: V,
    created_at: DateTime<Utc>,
    accessed_at: Option<DateTime<Utc>>,
    absolute_expiration: Option<DateTime<Utc>>,
    sliding_expiration: Option<Duration>,
    dependencies: Vec<Arc<dyn Dependency>>,
}

impl<V> Item<V> {
    /// Creates an item stamped with the current time.
    ///
    /// Fails with [`CacheError::Validation`](crate::error::CacheError::Validation)
    /// if `key` is empty.
    pub fn new(key: impl Into<String>, value: V) -> Result<Self> {
        Self::new_at(key, value, Utc::now())
    }

    /// Creates an item with an explicit creation timestamp.
    pub fn new_at(key: impl Into<String>, value: V, created_at: DateTime<Utc>) -> Result<Self> {
        let key = key.into();
        validate_key(&key)?;
        Ok(Self {
            key,
            value,
            created_at,
            accessed_at: None,
            absolute_expiration: None,
            sliding_expiration: None,
            dependencies: Vec::new(),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    pub fn into_value(self) -> V {
        self.value
    }

    /// Replaces the payload, returning the previous one.
    pub fn replace_value(&mut self, value: V) -> V {
        std::mem::replace(&mut self.value, value)
    }

    pub fn creation_time(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last successful read through the cache, if any.
    pub fn accessed_at(&self) -> Option<DateTime<Utc>> {
        self.accessed_at
    }

    pub fn absolute_expiration(&self) -> Option<DateTime<Utc>> {
        self.absolute_expiration
    }

    pub fn sliding_expiration(&self) -> Option<Duration> {
        self.sliding_expiration
    }

    pub fn dependencies(&self) -> &[Arc<dyn Dependency>] {
        &self.dependencies
    }

    pub fn set_absolute_expiration(&mut self, at: DateTime<Utc>) {
        self.absolute_expiration = Some(at);
    }

    /// Sets the sliding period. A zero period disables sliding expiration.
    pub fn set_sliding_expiration(&mut self, period: Duration) {
        self.sliding_expiration = (!period.is_zero()).then_some(period);
    }

    pub fn set_dependencies(&mut self, dependencies: impl IntoIterator<Item = Arc<dyn Dependency>>) {
        self.dependencies = dependencies.into_iter().collect();
    }

    pub fn add_dependency(&mut self, dependency: Arc<dyn Dependency>) {
        self.dependencies.push(dependency);
    }

    pub fn with_absolute_expiration(mut self, at: DateTime<Utc>) -> Self {
        self.set_absolute_expiration(at);
        self
    }

    pub fn with_sliding_expiration(mut self, period: Duration) -> Self {
        self.set_sliding_expiration(period);
        self
    }

    pub fn with_dependency(mut self, dependency: impl Dependency + 'static) -> Self {
        self.add_dependency(Arc::new(dependency));
        self
    }

    /// Records a successful read at the current time.
    pub(crate) fn touch(&mut self) {
        self.touch_at(Utc::now());
    }

    pub(crate) fn touch_at(&mut self, now: DateTime<Utc>) {
        self.accessed_at = Some(now);
    }

    /// Restores the access timestamp of a decoded item.
    pub(crate) fn restore_accessed_at(&mut self, accessed_at: Option<DateTime<Utc>>) {
        self.accessed_at = accessed_at;
    }

    /// Reports whether the item has expired as of now.
    pub fn has_expired(&self) -> bool {
        self.has_expired_at(Utc::now())
    }

    /// Reports whether the item has expired as of `now`.
    pub fn has_expired_at(&self, now: DateTime<Utc>) -> bool {
        if let Some(deadline) = self.absolute_expiration
            && deadline < now
        {
            return true;
        }

        if let Some(period) = self.sliding_expiration {
            let since = self.accessed_at.unwrap_or(self.created_at);
            // A period too large for chrono never elapses.
            let deadline = TimeDelta::from_std(period)
                .ok()
                .and_then(|delta| since.checked_add_signed(delta));
            if let Some(deadline) = deadline
                && deadline < now
            {
                return true;
            }
        }

        self.dependencies.iter().any(|dep| dep.has_changed())
    }
}

impl<V: fmt::Debug> fmt::Debug for Item<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("created_at", &self.created_at)
            .field("accessed_at", &self.accessed_at)
            .field("absolute_expiration", &self.absolute_expiration)
            .field("sliding_expiration", &self.sliding_expiration)
            .field("dependencies", &self.dependencies.len())
            .finish()
    }
}
