//! Error types for the cachelayer library.
//!
//! ## Key Components
//!
//! - [`CacheError::Validation`]: caller mistakes such as an empty key or an
//!   empty multilevel chain. Never retried automatically.
//! - [`CacheError::Storage`]: a container failure wrapped by the orchestrator
//!   with the operation name and the key it was working on.
//! - [`CacheError::Backend`]: a failure raised by a concrete container
//!   (typically a persisted one); the in-memory engines never produce it.
//! - [`CacheError::Encoding`]: item byte encoding or decoding failed.
//!
//! A cache miss (or an expired item) is `Ok(None)`, never an error. Asking the
//! registry for an engine that was not linked is a configuration defect and
//! panics instead of returning a value.
//!
//! ## Example Usage
//!
//! ```
//! use cachelayer::error::CacheError;
//! use cachelayer::item::Item;
//!
//! let err = Item::new("", 1).unwrap_err();
//! assert!(err.is_validation());
//! assert!(err.to_string().contains("key"));
//! ```

use std::error::Error as StdError;

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, CacheError>;

/// Errors surfaced by items, containers and the cache orchestrator.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Invalid input supplied by the caller.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A container operation failed; carries the operation and key for diagnosis.
    #[error("could not {operation} item{}", key_suffix(.key))]
    Storage {
        operation: &'static str,
        key: Option<String>,
        #[source]
        source: Box<CacheError>,
    },

    /// Failure reported by a concrete container implementation.
    #[error("container backend failed: {0}")]
    Backend(#[source] Box<dyn StdError + Send + Sync>),

    /// Item encoding or decoding failed.
    #[error("item encoding failed: {0}")]
    Encoding(String),
}

fn key_suffix(key: &Option<String>) -> String {
    match key {
        Some(key) => format!(" with key {key:?}"),
        None => String::new(),
    }
}

impl CacheError {
    /// Creates a [`CacheError::Validation`].
    #[inline]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Wraps `source` with the failing operation and (optional) key.
    pub fn storage(operation: &'static str, key: Option<&str>, source: CacheError) -> Self {
        Self::Storage {
            operation,
            key: key.map(str::to_owned),
            source: Box::new(source),
        }
    }

    /// Wraps an arbitrary error raised by a container implementation.
    pub fn backend(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::Backend(err.into())
    }

    /// Returns `true` for [`CacheError::Validation`].
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns the operation name if this is a wrapped storage failure.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::Storage { operation, .. } => Some(*operation),
            _ => None,
        }
    }

    /// Returns the innermost error, unwrapping any number of storage layers.
    pub fn root_cause(&self) -> &CacheError {
        let mut current = self;
        while let Self::Storage { source, .. } = current {
            current = source;
        }
        current
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encoding(err.to_string())
    }
}

/// Rejects empty keys.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::validation("key cannot be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display_shows_message() {
        let err = CacheError::validation("key cannot be empty");
        assert_eq!(err.to_string(), "validation failed: key cannot be empty");
        assert!(err.is_validation());
    }

    #[test]
    fn storage_display_includes_operation_and_key() {
        let err = CacheError::storage("put", Some("user:1"), CacheError::backend("disk full"));
        assert_eq!(err.to_string(), "could not put item with key \"user:1\"");
        assert_eq!(err.operation(), Some("put"));
        assert!(!err.is_validation());
    }

    #[test]
    fn storage_without_key_omits_suffix() {
        let err = CacheError::storage("clear", None, CacheError::backend("gone"));
        assert_eq!(err.to_string(), "could not clear item");
    }

    #[test]
    fn storage_exposes_source_chain() {
        let err = CacheError::storage("get", Some("k"), CacheError::backend("io"));
        let source = err.source().expect("storage error has a source");
        assert!(source.to_string().contains("io"));
        assert!(matches!(err.root_cause(), CacheError::Backend(_)));
    }

    #[test]
    fn validate_key_rejects_empty() {
        assert!(validate_key("").unwrap_err().is_validation());
        assert!(validate_key("a").is_ok());
    }

    #[test]
    fn serde_json_errors_become_encoding_errors() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: CacheError = json_err.into();
        assert!(matches!(err, CacheError::Encoding(_)));
    }

    #[test]
    fn cache_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + StdError>() {}
        assert_send_sync::<CacheError>();
    }
}
