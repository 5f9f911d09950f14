//! # Save the Date
//!
//! Backend for Ben & Emily's wedding announcement page: a live countdown to
//! the ceremony, a guest book with optional selfies, an excitement button,
//! confetti, and a calendar download.
//!
//! ## Modules
//!
//! - [`countdown`]: Time remaining and the per-view ticker
//! - [`guestbook`]: Entries and the excitement counter, persisted best effort
//! - [`storage`]: Key-value stores behind the guest book
//! - [`celebration`]: Confetti bursts
//! - [`calendar`]: iCalendar rendering
//! - [`content`]: Static tab copy
//! - [`api`]: REST API server with Axum
//! - [`websocket`]: Live updates for open pages
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use save_the_date::guestbook::GuestBook;
//! use save_the_date::storage::MemoryStore;
//! use save_the_date::config::EventConfig;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let countdown = EventConfig::default().countdown()?;
//!     println!("{}", countdown.now());
//!
//!     let mut book = GuestBook::load(Arc::new(MemoryStore::new())).await;
//!     book.submit("Alice", "Congratulations!", None).await;
//!     println!("{} signatures", book.len());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod calendar;
pub mod celebration;
pub mod config;
pub mod content;
pub mod countdown;
pub mod guestbook;
pub mod logging;
pub mod storage;
pub mod websocket;

// Re-export top-level types for convenience
pub use countdown::{Countdown, CountdownState, CountdownTicker};

pub use guestbook::{GuestBook, GuestBookEntry};

pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError, StorageResult};

pub use celebration::{Celebration, ConfettiBurst};

pub use calendar::CalendarEvent;

pub use content::{SiteContent, Tab};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config};
