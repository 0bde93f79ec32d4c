//! Storage error types.

use thiserror::Error;

/// Errors raised by a `KeyValueStore`.
///
/// These never escape the `Storage` adapter; they are logged and replaced
/// with the caller's default.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The store cannot be used at all (disabled, lock poisoned, ...).
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Writing would exceed the store's capacity.
    #[error("Quota exceeded: {needed} bytes needed, quota is {quota}")]
    QuotaExceeded { needed: usize, quota: usize },

    /// Failed to encode or decode a value.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Underlying file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file exists but is not a valid store.
    #[error("Corrupt store at {path}: {reason}")]
    Corrupt { path: String, reason: String },
}
