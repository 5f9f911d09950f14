//! Key-value persistence
//!
//! The site's only durable state is a handful of string values stored under
//! fixed keys, the way a browser keeps them in local storage:
//!
//! - **kv**: the [`KeyValueStore`] trait and an in-memory implementation
//! - **file**: a directory-backed implementation used by the server
//! - **error**: error types
//!
//! # Example
//!
//! ```rust,no_run
//! use save_the_date::storage::{FileStore, FileStoreConfig, KeyValueStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = FileStore::open(FileStoreConfig::new("./data")).await?;
//!
//!     store.set("weddingButtonCount", b"7").await?;
//!     let count = store.get("weddingButtonCount").await?;
//!
//!     assert_eq!(count.as_deref(), Some(&b"7"[..]));
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod file;
pub mod kv;

pub use error::{StorageError, StorageResult};
pub use file::{FileStore, FileStoreConfig};
pub use kv::{validate_key, KeyValueStore, MemoryStore};
