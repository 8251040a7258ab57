//! Structural decorators that wrap other containers.
//!
//! Both implement [`Container`](crate::traits::Container) themselves, so they
//! nest with each other and with any engine.

pub mod concurrent;
pub mod multilevel;

pub use concurrent::ConcurrentContainer;
pub use multilevel::MultilevelContainer;
