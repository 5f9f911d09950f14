//! Storage error types
//!
//! Defines all errors that can occur in the key-value storage layer.

use thiserror::Error;

/// Errors that can occur while reading or writing the key-value store
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Value is larger than the store accepts
    #[error("Quota exceeded for key {key}: {size} bytes (limit {limit})")]
    QuotaExceeded { key: String, size: usize, limit: usize },

    /// Key contains characters the store cannot address
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
