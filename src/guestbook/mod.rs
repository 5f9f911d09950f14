//! Guest Book
//!
//! - **entry**: the persisted [`GuestBookEntry`] record
//! - **store**: [`GuestBook`], the list plus excitement counter kept in sync
//!   with a key-value store
//! - **photo**: encoding a selfie file as a data URL
//!
//! # Example
//!
//! ```rust,no_run
//! use save_the_date::guestbook::GuestBook;
//! use save_the_date::storage::{KeyValueStore, MemoryStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
//!     let mut book = GuestBook::load(store).await;
//!
//!     book.submit("Alice", "Congrats!", None).await;
//!     book.increment_excitement().await;
//!
//!     assert_eq!(book.len(), 1);
//!     assert_eq!(book.excitement_count(), 1);
//! }
//! ```

pub mod entry;
pub mod photo;
pub mod store;

pub use entry::GuestBookEntry;
pub use photo::{photo_to_data_url, read_photo_data_url, PhotoError};
pub use store::{GuestBook, EXCITEMENT_KEY, GUEST_BOOK_KEY};
