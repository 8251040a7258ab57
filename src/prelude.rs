pub use crate::builder::CacheBuilder;
pub use crate::cache::{Cache, SharedCache};
pub use crate::codec::ItemCodec;
pub use crate::config::{CacheConfig, LevelConfig};
pub use crate::decorator::{ConcurrentContainer, MultilevelContainer};
pub use crate::dependency::{Dependency, FileDependency};
pub use crate::error::CacheError;
pub use crate::item::Item;
#[cfg(feature = "policy-arc")]
pub use crate::policy::ArcContainer;
#[cfg(feature = "policy-fifo")]
pub use crate::policy::FifoContainer;
#[cfg(feature = "policy-lfu")]
pub use crate::policy::LfuContainer;
#[cfg(feature = "policy-mru")]
pub use crate::policy::MruContainer;
pub use crate::registry::{ContainerFactory, PolicyKind, Registry};
pub use crate::traits::{BoxedContainer, Container, ReadOnlyContainer};
