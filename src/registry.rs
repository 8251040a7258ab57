//! Policy identifiers and the table of engine factories.
//!
//! The set of identifiers is closed ([`PolicyKind`]); which of them have an
//! engine behind them is decided when the registry is assembled.
//! [`Registry::linked`] registers every engine compiled in through cargo
//! features. LRU is a recognised identifier with no engine in this crate.
//!
//! ```text
//!   PolicyKind   factory
//!   ──────────   ──────────────────────────
//!   Fifo         Some(FifoContainer::boxed)
//!   Lfu          Some(LfuContainer::boxed)
//!   Lru          None                       → new_container panics
//!   Mru          Some(MruContainer::boxed)
//!   Arc          Some(ArcContainer::boxed)
//! ```
//!
//! Asking for an unavailable policy is a build or wiring mistake, not a data
//! error, so [`Registry::new_container`] panics instead of returning an error.
//! Use [`Registry::available`] first when the policy comes from user input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CacheError;
use crate::traits::BoxedContainer;

/// Eviction policy identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    Fifo,
    Lfu,
    Lru,
    Mru,
    Arc,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 5] = [
        PolicyKind::Fifo,
        PolicyKind::Lfu,
        PolicyKind::Lru,
        PolicyKind::Mru,
        PolicyKind::Arc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Fifo => "fifo",
            PolicyKind::Lfu => "lfu",
            PolicyKind::Lru => "lru",
            PolicyKind::Mru => "mru",
            PolicyKind::Arc => "arc",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CacheError::validation(format!("unknown policy {s:?}")))
    }
}

/// Builds an engine with the given capacity.
pub type ContainerFactory<V> = fn(usize) -> BoxedContainer<V>;

/// Table of engine factories, one slot per [`PolicyKind`].
pub struct Registry<V> {
    factories: [Option<ContainerFactory<V>>; 5],
}

impl<V> Registry<V> {
    /// A registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            factories: [None; 5],
        }
    }

    /// Registers (or replaces) the factory for `kind`.
    pub fn register(&mut self, kind: PolicyKind, factory: ContainerFactory<V>) -> &mut Self {
        tracing::debug!(policy = %kind, "registered engine");
        self.factories[kind.slot()] = Some(factory);
        self
    }

    pub fn available(&self, kind: PolicyKind) -> bool {
        self.factories[kind.slot()].is_some()
    }

    /// Identifiers that currently have an engine.
    pub fn registered(&self) -> impl Iterator<Item = PolicyKind> + '_ {
        PolicyKind::ALL
            .into_iter()
            .filter(|kind| self.available(*kind))
    }

    /// Builds a new engine for `kind`.
    ///
    /// # Panics
    ///
    /// Panics if no engine is registered for `kind`.
    pub fn new_container(&self, kind: PolicyKind, capacity: usize) -> BoxedContainer<V> {
        match self.factories[kind.slot()] {
            Some(factory) => factory(capacity),
            None => panic!("requested {kind} container is unavailable"),
        }
    }
}

impl<V> Registry<V>
where
    V: Clone + Send + 'static,
{
    /// Registers every engine compiled into this crate.
    pub fn linked() -> Self {
        let mut registry = Self::empty();
        #[cfg(feature = "policy-fifo")]
        registry.register(PolicyKind::Fifo, crate::policy::FifoContainer::boxed);
        #[cfg(feature = "policy-lfu")]
        registry.register(PolicyKind::Lfu, crate::policy::LfuContainer::boxed);
        #[cfg(feature = "policy-mru")]
        registry.register(PolicyKind::Mru, crate::policy::MruContainer::boxed);
        #[cfg(feature = "policy-arc")]
        registry.register(PolicyKind::Arc, crate::policy::ArcContainer::boxed);
        registry
    }
}

impl<V> Default for Registry<V>
where
    V: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::linked()
    }
}

impl<V> Clone for Registry<V> {
    fn clone(&self) -> Self {
        Self {
            factories: self.factories,
        }
    }
}

impl<V> fmt::Debug for Registry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.registered()).finish()
    }
}
