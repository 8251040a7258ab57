//! External change detectors attached to cache items.
//!
//! A [`Dependency`] answers one question, "has the thing I watch changed?".
//! An item whose dependency reports a change is treated as expired by
//! [`Item::has_expired`](crate::item::Item::has_expired).
//!
//! Dependencies are shared behind `Arc` so items can be cloned cheaply and
//! handed to concurrent readers. To survive a trip through
//! [`ItemCodec`](crate::codec::ItemCodec), a dependency reports a stable
//! [`kind`](Dependency::kind) tag plus its serialisable
//! [`state`](Dependency::state), and the codec must have a decoder registered
//! for that tag.

use std::fmt;

pub mod file;

pub use file::FileDependency;

/// Change detector consumed by [`Item`](crate::item::Item).
pub trait Dependency: fmt::Debug + Send + Sync {
    /// Reports whether the watched resource has changed.
    fn has_changed(&self) -> bool;

    /// Stable tag identifying the concrete type inside encoded items.
    fn kind(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Serialisable snapshot of the dependency, used by the item codec.
    fn state(&self) -> serde_json::Result<serde_json::Value> {
        Ok(serde_json::Value::Null)
    }
}
