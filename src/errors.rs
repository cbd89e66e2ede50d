//! Shared error types for cache operations.

use std::num::ParseIntError;
use thiserror::Error;

/// Error type for object cache operations.
///
/// Lookups of untracked identifiers through [`crate::ObjectCache::is_deleted`]
/// surface as `ObjectNotFound`; the deliberately softer `mark_deleted`
/// path reports absence as a plain `false` instead, because a delete
/// racing ahead of a GC pass is normal caller behavior.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Status query for an identifier the cache does not track.
    #[error("object not found: {id}")]
    ObjectNotFound { id: String },

    /// Malformed age threshold string (expected whole milliseconds).
    #[error("invalid age threshold {value:?}")]
    InvalidAge {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

impl CacheError {
    /// Create an `ObjectNotFound` error carrying the identifier.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::ObjectNotFound { id: id.into() }
    }

    /// The identifier associated with this error, if any.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::ObjectNotFound { id } => Some(id),
            Self::InvalidAge { .. } => None,
        }
    }
}
