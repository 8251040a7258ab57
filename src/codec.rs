//! Self-describing byte encoding of items.
//!
//! Containers that keep items outside the process (on disk, in another
//! service) need to turn an [`Item`] into bytes and back. [`ItemCodec`]
//! writes JSON with every item field, so a decoded item expires exactly like
//! the original would have.
//!
//! ## Dependencies
//!
//! Dependencies are trait objects, so the codec cannot know how to rebuild
//! them on its own. Each one is written as `{ "kind": .., "state": .. }`
//! using [`Dependency::kind`] and [`Dependency::state`], and read back
//! through a decoder registered for that kind:
//!
//! ```text
//!   encode:  Arc<dyn Dependency> ──kind()/state()──► { kind, state }
//!   decode:  { kind, state } ──decoders[kind]──► Arc<dyn Dependency>
//! ```
//!
//! An item carrying a dependency whose kind is not registered fails to encode
//! and fails to decode.
//!
//! ## Example Usage
//!
//! ```
//! use cachelayer::codec::ItemCodec;
//! use cachelayer::item::Item;
//!
//! let codec = ItemCodec::with_builtin();
//! let item = Item::new("user:1", vec![1u8, 2, 3]).unwrap();
//!
//! let bytes = codec.encode(&item).unwrap();
//! let back: Item<Vec<u8>> = codec.decode(&bytes).unwrap();
//! assert_eq!(back.key(), "user:1");
//! assert_eq!(back.value(), &vec![1, 2, 3]);
//! assert_eq!(back.creation_time(), item.creation_time());
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::dependency::{Dependency, FileDependency};
use crate::error::{CacheError, Result};
use crate::item::Item;

type DecodeFn = fn(serde_json::Value) -> serde_json::Result<Arc<dyn Dependency>>;

#[derive(Serialize, Deserialize)]
struct ItemRecord<V> {
    key: String,
    value: V,
    created_at: DateTime<Utc>,
    accessed_at: Option<DateTime<Utc>>,
    absolute_expiration: Option<DateTime<Utc>>,
    sliding_expiration: Option<Duration>,
    #[serde(default)]
    dependencies: Vec<DependencyRecord>,
}

#[derive(Serialize, Deserialize)]
struct DependencyRecord {
    kind: String,
    state: serde_json::Value,
}

fn decode_dependency<D>(state: serde_json::Value) -> serde_json::Result<Arc<dyn Dependency>>
where
    D: Dependency + DeserializeOwned + 'static,
{
    let dependency: D = serde_json::from_value(state)?;
    Ok(Arc::new(dependency))
}

/// Encodes and decodes items, rebuilding dependencies through registered
/// decoders.
#[derive(Clone, Default)]
pub struct ItemCodec {
    decoders: FxHashMap<String, DecodeFn>,
}

impl ItemCodec {
    /// A codec with no dependency kinds registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// A codec that knows the dependency types shipped with this crate.
    pub fn with_builtin() -> Self {
        let mut codec = Self::new();
        codec.register::<FileDependency>(FileDependency::KIND);
        codec
    }

    /// Registers `D` under `kind`, which must match what `D::kind` reports.
    pub fn register<D>(&mut self, kind: &str) -> &mut Self
    where
        D: Dependency + DeserializeOwned + 'static,
    {
        self.decoders.insert(kind.to_owned(), decode_dependency::<D>);
        self
    }

    pub fn is_registered(&self, kind: &str) -> bool {
        self.decoders.contains_key(kind)
    }

    pub fn encode<V>(&self, item: &Item<V>) -> Result<Vec<u8>>
    where
        V: Serialize,
    {
        let dependencies = item
            .dependencies()
            .iter()
            .map(|dependency| -> Result<DependencyRecord> {
                let kind = dependency.kind();
                if !self.is_registered(kind) {
                    return Err(unregistered(kind));
                }
                Ok(DependencyRecord {
                    kind: kind.to_owned(),
                    state: dependency.state()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let record = ItemRecord {
            key: item.key().to_owned(),
            value: item.value(),
            created_at: item.creation_time(),
            accessed_at: item.accessed_at(),
            absolute_expiration: item.absolute_expiration(),
            sliding_expiration: item.sliding_expiration(),
            dependencies,
        };
        Ok(serde_json::to_vec(&record)?)
    }

    /// Rebuilds an item. The key is validated again, so a record with an
    /// empty key fails with a validation error.
    pub fn decode<V>(&self, bytes: &[u8]) -> Result<Item<V>>
    where
        V: DeserializeOwned,
    {
        let record: ItemRecord<V> = serde_json::from_slice(bytes)?;

        let dependencies = record
            .dependencies
            .into_iter()
            .map(|dependency| -> Result<Arc<dyn Dependency>> {
                let decode = self
                    .decoders
                    .get(&dependency.kind)
                    .ok_or_else(|| unregistered(&dependency.kind))?;
                Ok(decode(dependency.state)?)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut item = Item::new_at(record.key, record.value, record.created_at)?;
        if let Some(at) = record.absolute_expiration {
            item.set_absolute_expiration(at);
        }
        if let Some(period) = record.sliding_expiration {
            item.set_sliding_expiration(period);
        }
        item.set_dependencies(dependencies);
        item.restore_accessed_at(record.accessed_at);
        Ok(item)
    }
}

fn unregistered(kind: &str) -> CacheError {
    CacheError::Encoding(format!("dependency kind {kind:?} is not registered"))
}

impl std::fmt::Debug for ItemCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.decoders.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    struct Version {
        current: u32,
        seen: u32,
    }

    impl Dependency for Version {
        fn has_changed(&self) -> bool {
            self.current != self.seen
        }

        fn kind(&self) -> &'static str {
            "version"
        }

        fn state(&self) -> serde_json::Result<serde_json::Value> {
            serde_json::to_value(self)
        }
    }

    #[test]
    fn round_trip_keeps_every_field() {
        let created = Utc::now() - TimeDelta::minutes(5);
        let mut item = Item::new_at("k", "v".to_string(), created)
            .unwrap()
            .with_absolute_expiration(created + TimeDelta::hours(1))
            .with_sliding_expiration(Duration::from_secs(90));
        item.touch_at(created + TimeDelta::minutes(1));

        let codec = ItemCodec::new();
        let back: Item<String> = codec.decode(&codec.encode(&item).unwrap()).unwrap();

        assert_eq!(back.key(), "k");
        assert_eq!(back.value(), "v");
        assert_eq!(back.creation_time(), item.creation_time());
        assert_eq!(back.accessed_at(), item.accessed_at());
        assert_eq!(back.absolute_expiration(), item.absolute_expiration());
        assert_eq!(back.sliding_expiration(), Some(Duration::from_secs(90)));
        assert!(back.dependencies().is_empty());
    }

    #[test]
    fn custom_dependency_round_trip() {
        let item = Item::new("k", 1u8).unwrap().with_dependency(Version {
            current: 2,
            seen: 1,
        });

        let mut codec = ItemCodec::new();
        codec.register::<Version>("version");
        let back: Item<u8> = codec.decode(&codec.encode(&item).unwrap()).unwrap();

        assert_eq!(back.dependencies().len(), 1);
        assert_eq!(back.dependencies()[0].kind(), "version");
        assert!(back.has_expired());
    }

    #[test]
    fn unregistered_kind_fails_to_encode() {
        let item = Item::new("k", 1u8).unwrap().with_dependency(Version {
            current: 1,
            seen: 1,
        });
        let err = ItemCodec::with_builtin().encode(&item).unwrap_err();
        assert!(matches!(err, CacheError::Encoding(_)));
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn unregistered_kind_fails_to_decode() {
        let item = Item::new("k", 1u8).unwrap().with_dependency(Version {
            current: 1,
            seen: 1,
        });
        let mut writer = ItemCodec::new();
        writer.register::<Version>("version");
        let bytes = writer.encode(&item).unwrap();

        let err = ItemCodec::with_builtin().decode::<u8>(&bytes).unwrap_err();
        assert!(matches!(err, CacheError::Encoding(_)));
    }

    #[test]
    fn empty_key_in_record_fails_validation() {
        let bytes = br#"{"key":"","value":1,"created_at":"2024-01-01T00:00:00Z",
            "accessed_at":null,"absolute_expiration":null,"sliding_expiration":null}"#;
        let err = ItemCodec::new().decode::<u8>(bytes).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn garbage_is_an_encoding_error() {
        let err = ItemCodec::new().decode::<u8>(b"\x00\x01").unwrap_err();
        assert!(matches!(err, CacheError::Encoding(_)));
    }

    #[test]
    fn builtin_knows_file_dependencies() {
        let codec = ItemCodec::with_builtin();
        assert!(codec.is_registered(FileDependency::KIND));
        assert!(!codec.is_registered("version"));
    }
}
