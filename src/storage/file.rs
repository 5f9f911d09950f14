//! File-backed key-value store
//!
//! One file per key inside the data directory. Writes land in a temporary
//! sibling file first and are renamed over the old value, so a crash mid-write
//! leaves the previous value intact.

use crate::storage::error::StorageResult;
use crate::storage::kv::{check_quota, validate_key, KeyValueStore};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Configuration for the file store
#[derive(Debug, Clone)]
pub struct FileStoreConfig {
    /// Directory holding one file per key
    pub data_dir: PathBuf,
    /// Largest value accepted, in bytes (None = unlimited)
    pub max_value_bytes: Option<usize>,
}

impl FileStoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            max_value_bytes: None,
        }
    }

    /// Get path of the file holding `key`
    pub fn value_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.value", key))
    }
}

/// Key-value store persisting each key to its own file
#[derive(Debug)]
pub struct FileStore {
    config: FileStoreConfig,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at the configured directory
    pub async fn open(config: FileStoreConfig) -> StorageResult<Self> {
        tokio::fs::create_dir_all(&config.data_dir).await?;
        tracing::debug!(data_dir = ?config.data_dir, "Opened file store");
        Ok(Self { config })
    }

    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        validate_key(key)?;
        match tokio::fs::read(self.config.value_path(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        validate_key(key)?;
        check_quota(key, value.len(), self.config.max_value_bytes)?;

        let path = self.config.value_path(key);
        let tmp = self.config.data_dir.join(format!(".{}.tmp", key));
        tokio::fs::write(&tmp, value).await?;
        tokio::fs::rename(&tmp, &path).await?;

        tracing::trace!(key, bytes = value.len(), "Wrote value");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(FileStoreConfig::new(dir.path())).await.unwrap();

        assert!(store.get("guestBookEntries").await.unwrap().is_none());

        store.set("guestBookEntries", b"[]").await.unwrap();
        let value = store.get("guestBookEntries").await.unwrap();
        assert_eq!(value.as_deref(), Some(&b"[]"[..]));
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let store = FileStore::open(FileStoreConfig::new(dir.path())).await.unwrap();
            store.set("weddingButtonCount", b"41").await.unwrap();
        }

        let store = FileStore::open(FileStoreConfig::new(dir.path())).await.unwrap();
        let value = store.get("weddingButtonCount").await.unwrap();
        assert_eq!(value.as_deref(), Some(&b"41"[..]));
    }

    #[tokio::test]
    async fn test_file_store_creates_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileStore::open(FileStoreConfig::new(&nested)).await.unwrap();

        assert!(nested.is_dir());
        assert_eq!(store.data_dir(), nested.as_path());
    }

    #[tokio::test]
    async fn test_file_store_quota_keeps_old_value() {
        let dir = tempdir().unwrap();
        let mut config = FileStoreConfig::new(dir.path());
        config.max_value_bytes = Some(8);
        let store = FileStore::open(config).await.unwrap();

        store.set("guestBookEntries", b"[]").await.unwrap();
        let err = store
            .set("guestBookEntries", b"[{\"too\":\"big\"}]")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { .. }));

        let value = store.get("guestBookEntries").await.unwrap();
        assert_eq!(value.as_deref(), Some(&b"[]"[..]));
    }

    #[tokio::test]
    async fn test_file_store_rejects_path_keys() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(FileStoreConfig::new(dir.path())).await.unwrap();

        let err = store.set("../outside", b"x").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }
}
