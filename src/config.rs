//! Declarative cache layout.
//!
//! A [`CacheConfig`] lists one or more levels (policy + capacity) and whether
//! the result should be shareable between threads. It is plain data, so it
//! can be loaded from JSON alongside the rest of an application's settings.
//!
//! ```json
//! {
//!   "levels": [
//!     { "policy": "arc",  "capacity": 1024 },
//!     { "policy": "fifo", "capacity": 65536 }
//!   ],
//!   "concurrent": true
//! }
//! ```
//!
//! Assembly, outermost first:
//!
//! ```text
//!   build_shared:  ConcurrentContainer   (cloneable SharedCache)
//!                    └── levels > 1?  MultilevelContainer
//!                                       ├── level 0 engine
//!                                       └── level 1 engine
//! ```
//!
//! A layout with `concurrent: true` has to be built with
//! [`CacheConfig::build_shared`]; [`CacheConfig::build`] rejects it, since a
//! single-owner cache has no handle another thread could use.

use serde::{Deserialize, Serialize};

use crate::cache::{Cache, SharedCache};
use crate::decorator::{ConcurrentContainer, MultilevelContainer};
use crate::error::{CacheError, Result};
use crate::registry::{PolicyKind, Registry};
use crate::traits::BoxedContainer;

/// One tier of a cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LevelConfig {
    pub policy: PolicyKind,
    pub capacity: usize,
}

/// Layout of a cache: its levels, fastest first, and whether it is shared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    pub levels: Vec<LevelConfig>,
    #[serde(default)]
    pub concurrent: bool,
}

impl CacheConfig {
    /// Single-level, single-owner layout.
    pub fn single(policy: PolicyKind, capacity: usize) -> Self {
        Self {
            levels: vec![LevelConfig { policy, capacity }],
            concurrent: false,
        }
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|err| CacheError::validation(format!("invalid cache config: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.levels.is_empty() {
            return Err(CacheError::validation("cache config needs at least one level"));
        }
        Ok(())
    }

    /// Builds a single-owner cache from engines in `registry`.
    ///
    /// Unlike [`Registry::new_container`], a policy without an engine is
    /// reported as a validation error, since configs usually come from
    /// outside the program. So is `concurrent: true`; use
    /// [`build_shared`](Self::build_shared) for those layouts.
    pub fn build<V>(&self, registry: &Registry<V>) -> Result<Cache<V>>
    where
        V: Clone + Send + 'static,
    {
        if self.concurrent {
            return Err(CacheError::validation(
                "concurrent cache config must be built with build_shared",
            ));
        }
        let container = self.assemble(registry)?;
        tracing::debug!(levels = self.levels.len(), "built cache");
        Ok(Cache::new(container))
    }

    /// Builds a cache whose clones share one locked container, whatever the
    /// `concurrent` flag says.
    pub fn build_shared<V>(&self, registry: &Registry<V>) -> Result<SharedCache<V>>
    where
        V: Clone + Send + 'static,
    {
        let container = self.assemble(registry)?;
        tracing::debug!(levels = self.levels.len(), "built shared cache");
        Ok(Cache::new(ConcurrentContainer::new(container)))
    }

    fn assemble<V>(&self, registry: &Registry<V>) -> Result<BoxedContainer<V>>
    where
        V: Clone + Send + 'static,
    {
        self.validate()?;
        if let Some(missing) = self
            .levels
            .iter()
            .find(|level| !registry.available(level.policy))
        {
            return Err(CacheError::validation(format!(
                "no engine registered for policy {}",
                missing.policy
            )));
        }

        let mut levels: Vec<BoxedContainer<V>> = self
            .levels
            .iter()
            .map(|level| registry.new_container(level.policy, level.capacity))
            .collect();

        if levels.len() == 1
            && let Some(only) = levels.pop()
        {
            return Ok(only);
        }
        Ok(Box::new(MultilevelContainer::new(levels)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;

    #[test]
    fn parses_full_document() {
        let config = CacheConfig::from_json_str(
            r#"{
                "levels": [
                    { "policy": "arc", "capacity": 2 },
                    { "policy": "fifo", "capacity": 8 }
                ],
                "concurrent": true
            }"#,
        )
        .unwrap();

        assert_eq!(config.levels.len(), 2);
        assert_eq!(config.levels[0].policy, PolicyKind::Arc);
        assert_eq!(config.levels[1].capacity, 8);
        assert!(config.concurrent);
    }

    #[test]
    fn concurrent_defaults_to_false() {
        let config =
            CacheConfig::from_json_str(r#"{ "levels": [{ "policy": "lfu", "capacity": 4 }] }"#)
                .unwrap();
        assert_eq!(config, CacheConfig::single(PolicyKind::Lfu, 4));
    }

    #[test]
    fn rejects_empty_levels_and_bad_documents() {
        assert!(
            CacheConfig::from_json_str(r#"{ "levels": [] }"#)
                .unwrap_err()
                .is_validation()
        );
        assert!(
            CacheConfig::from_json_str(r#"{ "levels": [{ "policy": "clock", "capacity": 1 }] }"#)
                .unwrap_err()
                .is_validation()
        );
        assert!(CacheConfig::from_json_str("[").unwrap_err().is_validation());
    }

    #[test]
    fn json_round_trip() {
        let config = CacheConfig {
            levels: vec![
                LevelConfig {
                    policy: PolicyKind::Mru,
                    capacity: 3,
                },
                LevelConfig {
                    policy: PolicyKind::Arc,
                    capacity: 30,
                },
            ],
            concurrent: true,
        };
        let json = config.to_json_string().unwrap();
        assert_eq!(CacheConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn unregistered_policy_is_a_validation_error() {
        let config = CacheConfig::single(PolicyKind::Lru, 4);
        let err = config.build::<u32>(&Registry::linked()).err().unwrap();
        assert!(err.is_validation());
        assert!(err.to_string().contains("lru"));
    }

    #[test]
    fn builds_working_caches() {
        let registry = Registry::linked();
        let layouts = [
            CacheConfig::single(PolicyKind::Fifo, 2),
            CacheConfig {
                levels: vec![
                    LevelConfig {
                        policy: PolicyKind::Arc,
                        capacity: 2,
                    },
                    LevelConfig {
                        policy: PolicyKind::Lfu,
                        capacity: 4,
                    },
                ],
                concurrent: false,
            },
        ];

        for config in layouts {
            let mut cache = config.build(&registry).unwrap();
            cache.put(Item::new("a", 1u32).unwrap()).unwrap();
            assert_eq!(*cache.get("a").unwrap().unwrap().value(), 1);
            cache.remove("a").unwrap();
            assert!(cache.get("a").unwrap().is_none());
        }
    }

    #[test]
    fn concurrent_layout_needs_build_shared() {
        let mut config = CacheConfig::single(PolicyKind::Arc, 4);
        config.concurrent = true;

        let err = config.build::<u32>(&Registry::linked()).err().unwrap();
        assert!(err.is_validation());
        assert!(err.to_string().contains("build_shared"));
        assert!(config.build_shared::<u32>(&Registry::linked()).is_ok());
    }

    #[test]
    fn shared_clones_see_each_other() {
        let config = CacheConfig::from_json_str(
            r#"{ "levels": [{ "policy": "lfu", "capacity": 4 }], "concurrent": true }"#,
        )
        .unwrap();
        let mut writer = config.build_shared(&Registry::linked()).unwrap();
        let mut reader = writer.clone();

        writer.put(Item::new("a", 1u32).unwrap()).unwrap();
        assert_eq!(*reader.get("a").unwrap().unwrap().value(), 1);
        reader.remove("a").unwrap();
        assert!(writer.get("a").unwrap().is_none());
        assert_eq!(writer.container().handle_count(), 2);
    }

    #[test]
    fn shared_build_still_checks_policies() {
        let err = CacheConfig::single(PolicyKind::Lru, 4)
            .build_shared::<u32>(&Registry::linked())
            .err().unwrap();
        assert!(err.is_validation());
    }
}
