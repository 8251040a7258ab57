//! Eviction engines.
//!
//! | Engine | Feature        | Evicts                                  |
//! |--------|----------------|-----------------------------------------|
//! | FIFO   | `policy-fifo`  | oldest insert/update                    |
//! | MRU    | `policy-mru`   | newest insert/update                    |
//! | LFU    | `policy-lfu`   | lowest access count                     |
//! | ARC    | `policy-arc`   | adaptive between recency and frequency  |
//!
//! LRU is a recognised [`PolicyKind`](crate::registry::PolicyKind) with no
//! engine in this crate; a caller can register one of their own.

#[cfg(feature = "policy-arc")]
pub mod arc;
#[cfg(feature = "policy-fifo")]
pub mod fifo;
#[cfg(feature = "policy-lfu")]
pub mod lfu;
#[cfg(feature = "policy-mru")]
pub mod mru;
#[cfg(any(feature = "policy-fifo", feature = "policy-mru"))]
mod sequence;

#[cfg(feature = "policy-arc")]
pub use arc::ArcContainer;
#[cfg(feature = "policy-fifo")]
pub use fifo::FifoContainer;
#[cfg(feature = "policy-lfu")]
pub use lfu::LfuContainer;
#[cfg(feature = "policy-mru")]
pub use mru::MruContainer;
