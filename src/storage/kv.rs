//! Key-value store abstraction
//!
//! The guest book only ever needs two primitives: read the bytes stored under
//! a key, and overwrite them. Anything that can do that (a directory of files,
//! an in-memory map, a browser storage binding) can back the site.

use crate::storage::error::{StorageError, StorageResult};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Minimal persistent key-value store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing was written yet
    async fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Overwrite the value stored under `key`
    async fn set(&self, key: &str, value: &[u8]) -> StorageResult<()>;

    /// Short name used in logs and health output
    fn name(&self) -> &'static str;
}

/// Check that a key is non-empty and only uses `[A-Za-z0-9_.-]`
pub fn validate_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// Reject values larger than `limit` bytes, if a limit is set
pub(crate) fn check_quota(key: &str, size: usize, limit: Option<usize>) -> StorageResult<()> {
    match limit {
        Some(limit) if size > limit => Err(StorageError::QuotaExceeded {
            key: key.to_string(),
            size,
            limit,
        }),
        _ => Ok(()),
    }
}

/// In-process store, lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, Vec<u8>>>,
    max_value_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects values above `limit` bytes
    pub fn with_quota(limit: usize) -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
            max_value_bytes: Some(limit),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        validate_key(key)?;
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        validate_key(key)?;
        check_quota(key, value.len(), self.max_value_bytes)?;
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("guestBookEntries").is_ok());
        assert!(validate_key("wedding_button-count.v2").is_ok());

        assert!(validate_key("").is_err());
        assert!(validate_key(".hidden").is_err());
        assert!(validate_key("../escape").is_err());
        assert!(validate_key("with space").is_err());
    }

    #[tokio::test]
    async fn test_memory_get_missing() {
        let store = MemoryStore::new();
        assert!(store.get("weddingButtonCount").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_set_overwrites() {
        let store = MemoryStore::new();
        store.set("weddingButtonCount", b"1").await.unwrap();
        store.set("weddingButtonCount", b"2").await.unwrap();

        let value = store.get("weddingButtonCount").await.unwrap();
        assert_eq!(value.as_deref(), Some(&b"2"[..]));
    }

    #[tokio::test]
    async fn test_memory_quota() {
        let store = MemoryStore::with_quota(4);
        store.set("small", b"1234").await.unwrap();

        let err = store.set("large", b"12345").await.unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { size: 5, limit: 4, .. }));
        assert!(store.get("large").await.unwrap().is_none());
    }
}
