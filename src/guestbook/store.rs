//! Guest Book Store
//!
//! Owns the in-memory guest book (newest first) and the excitement counter,
//! mirroring both to a [`KeyValueStore`] after every change. Persistence is
//! best effort: a failed write is logged and the session keeps the in-memory
//! copy, the way a browser tab does when local storage runs out of quota.

use crate::guestbook::entry::GuestBookEntry;
use crate::storage::{KeyValueStore, StorageResult};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Key holding the JSON array of entries
pub const GUEST_BOOK_KEY: &str = "guestBookEntries";

/// Key holding the excitement click count as a decimal string
pub const EXCITEMENT_KEY: &str = "weddingButtonCount";

/// Guest book and excitement counter backed by a key-value store
pub struct GuestBook {
    store: Arc<dyn KeyValueStore>,
    /// Newest first
    entries: Vec<GuestBookEntry>,
    excitement: u64,
}

impl GuestBook {
    /// Rehydrate from the store. Missing or unreadable values start empty.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let entries = match store.get(GUEST_BOOK_KEY).await {
            Ok(Some(bytes)) => match serde_json::from_slice::<Vec<serde_json::Value>>(&bytes) {
                Ok(values) => parse_entries(values),
                Err(e) => {
                    tracing::warn!(key = GUEST_BOOK_KEY, error = %e, "Ignoring unparseable guest book");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(key = GUEST_BOOK_KEY, error = %e, "Failed to read guest book");
                Vec::new()
            }
        };

        let excitement = match store.get(EXCITEMENT_KEY).await {
            Ok(Some(bytes)) => parse_count(&bytes).unwrap_or_else(|| {
                tracing::warn!(key = EXCITEMENT_KEY, "Ignoring unparseable excitement count");
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                tracing::warn!(key = EXCITEMENT_KEY, error = %e, "Failed to read excitement count");
                0
            }
        };

        tracing::info!(
            store = store.name(),
            entries = entries.len(),
            excitement,
            "Guest book loaded"
        );

        Self {
            store,
            entries,
            excitement,
        }
    }

    /// Sign the guest book now. See [`GuestBook::submit_at`].
    pub async fn submit(
        &mut self,
        name: &str,
        message: &str,
        photo: Option<String>,
    ) -> Option<GuestBookEntry> {
        self.submit_at(name, message, photo, Utc::now()).await
    }

    /// Sign the guest book as of `now`.
    ///
    /// Returns `None` without touching anything when `name` or `message` is
    /// empty. Otherwise the entry is prepended and the whole list rewritten.
    pub async fn submit_at(
        &mut self,
        name: &str,
        message: &str,
        photo: Option<String>,
        now: DateTime<Utc>,
    ) -> Option<GuestBookEntry> {
        if name.is_empty() || message.is_empty() {
            tracing::debug!("Ignoring guest book submission with an empty field");
            return None;
        }

        let mut entry = GuestBookEntry::new(name, message, photo, now);
        // Two signatures in the same millisecond would share an id
        while self.entries.iter().any(|e| e.id == entry.id) {
            entry.id += 1;
        }

        self.entries.insert(0, entry.clone());

        if let Err(e) = self.persist_entries().await {
            tracing::warn!(
                entry_id = entry.id,
                error = %e,
                "Guest book entry kept in memory only"
            );
        } else {
            tracing::info!(entry_id = entry.id, has_photo = entry.has_photo(), "Guest book signed");
        }

        Some(entry)
    }

    /// Entries, newest first
    pub fn entries(&self) -> &[GuestBookEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record one more excitement click and return the new total
    pub async fn increment_excitement(&mut self) -> u64 {
        self.excitement += 1;

        let value = self.excitement.to_string();
        if let Err(e) = self.store.set(EXCITEMENT_KEY, value.as_bytes()).await {
            tracing::warn!(count = self.excitement, error = %e, "Excitement count kept in memory only");
        }

        self.excitement
    }

    pub fn excitement_count(&self) -> u64 {
        self.excitement
    }

    /// Name of the backing store
    pub fn store_name(&self) -> &'static str {
        self.store.name()
    }

    /// Confirm the backing store can still be read
    pub async fn check_store(&self) -> StorageResult<()> {
        self.store.get(EXCITEMENT_KEY).await.map(|_| ())
    }

    async fn persist_entries(&self) -> StorageResult<()> {
        let json = serde_json::to_vec(&self.entries)?;
        self.store.set(GUEST_BOOK_KEY, &json).await
    }
}

/// Keep every well-formed entry; one bad element must not cost the rest
fn parse_entries(values: Vec<serde_json::Value>) -> Vec<GuestBookEntry> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(key = GUEST_BOOK_KEY, index, error = %e, "Skipping malformed guest book entry");
                None
            }
        })
        .collect()
}

/// Leading decimal digits after optional whitespace, so `"12px"` reads as 12
fn parse_count(bytes: &[u8]) -> Option<u64> {
    let text = std::str::from_utf8(bytes).ok()?.trim_start();
    let text = text.strip_prefix('+').unwrap_or(text);
    let digits = text
        .find(|c: char| !c.is_ascii_digit())
        .map_or(text, |end| &text[..end]);
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::{Duration, TimeZone};

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    async fn empty_book() -> (GuestBook, Arc<dyn KeyValueStore>) {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        (GuestBook::load(Arc::clone(&store)).await, store)
    }

    #[tokio::test]
    async fn test_load_empty_store() {
        let (book, _store) = empty_book().await;
        assert!(book.is_empty());
        assert_eq!(book.excitement_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_fields_are_ignored() {
        let (mut book, store) = empty_book().await;

        assert!(book.submit("", "msg", None).await.is_none());
        assert!(book.submit("name", "", None).await.is_none());
        assert!(book.submit("", "", None).await.is_none());

        assert_eq!(book.len(), 0);
        assert!(store.get(GUEST_BOOK_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_first_submission() {
        let (mut book, _store) = empty_book().await;
        let now = at(1_792_771_200_000);

        let entry = book.submit_at("Alice", "Congrats!", None, now).await.unwrap();

        assert_eq!(book.len(), 1);
        let stored = &book.entries()[0];
        assert_eq!(stored, &entry);
        assert_eq!(stored.name, "Alice");
        assert_eq!(stored.message, "Congrats!");
        assert_eq!(stored.id, now.timestamp_millis());
    }

    #[tokio::test]
    async fn test_newest_first() {
        let (mut book, _store) = empty_book().await;
        let t0 = at(1_792_771_200_000);

        let first = book.submit_at("Alice", "One", None, t0).await.unwrap();
        let second = book
            .submit_at("Bob", "Two", None, t0 + Duration::seconds(5))
            .await
            .unwrap();

        assert_eq!(book.entries(), &[second, first]);
    }

    #[tokio::test]
    async fn test_same_millisecond_ids_stay_unique() {
        let (mut book, _store) = empty_book().await;
        let now = at(1_792_771_200_000);

        let first = book.submit_at("Alice", "One", None, now).await.unwrap();
        let second = book.submit_at("Bob", "Two", None, now).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(second.id, first.id + 1);
    }

    #[tokio::test]
    async fn test_reload_round_trip() {
        let (mut book, store) = empty_book().await;
        let t0 = at(1_792_771_200_000);

        book.submit_at("Alice", "Congrats!", None, t0).await;
        book.submit_at(
            "Bob",
            "See you there",
            Some("data:image/png;base64,iVBORw0KGgo=".to_string()),
            t0 + Duration::minutes(1),
        )
        .await;
        let before = book.entries().to_vec();
        drop(book);

        let reloaded = GuestBook::load(store).await;
        assert_eq!(reloaded.entries(), before.as_slice());
    }

    #[tokio::test]
    async fn test_unparseable_book_starts_empty() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store.set(GUEST_BOOK_KEY, b"{not json").await.unwrap();
        store.set(EXCITEMENT_KEY, b"lots").await.unwrap();

        let book = GuestBook::load(store).await;
        assert!(book.is_empty());
        assert_eq!(book.excitement_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_entry_in_memory() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::with_quota(64));
        let mut book = GuestBook::load(Arc::clone(&store)).await;
        let photo = format!("data:image/jpeg;base64,{}", "A".repeat(256));

        let entry = book.submit("Dana", "Huge selfie", Some(photo)).await;
        assert!(entry.is_some());
        assert_eq!(book.len(), 1);

        let reloaded = GuestBook::load(store).await;
        assert!(reloaded.is_empty());
    }

    #[tokio::test]
    async fn test_excitement_counter() {
        let (mut book, store) = empty_book().await;

        for expected in 1..=5 {
            assert_eq!(book.increment_excitement().await, expected);
        }

        let raw = store.get(EXCITEMENT_KEY).await.unwrap().unwrap();
        assert_eq!(raw, b"5");

        let reloaded = GuestBook::load(store).await;
        assert_eq!(reloaded.excitement_count(), 5);
    }

    #[tokio::test]
    async fn test_failed_counter_write_keeps_count_in_memory() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::with_quota(0));
        let mut book = GuestBook::load(Arc::clone(&store)).await;

        assert_eq!(book.increment_excitement().await, 1);
        assert_eq!(book.increment_excitement().await, 2);
        assert_eq!(book.excitement_count(), 2);

        assert!(store.get(EXCITEMENT_KEY).await.unwrap().is_none());
        let reloaded = GuestBook::load(store).await;
        assert_eq!(reloaded.excitement_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_entry_does_not_drop_the_rest() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let stored = r#"[
            {"id": 2, "name": "Bob", "message": "Two", "timestamp": "2026-10-19T12:00:01.000Z"},
            {"id": 1, "name": "Alice", "message": "No timestamp"},
            {"id": 0, "name": "Carol", "message": "Zero", "photo": null, "timestamp": "2026-10-19T12:00:00.000Z"}
        ]"#;
        store.set(GUEST_BOOK_KEY, stored.as_bytes()).await.unwrap();

        let mut book = GuestBook::load(Arc::clone(&store)).await;
        let names: Vec<&str> = book.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Carol"]);

        book.submit_at("Dana", "Three", None, at(1_792_771_200_000)).await;
        let reloaded = GuestBook::load(store).await;
        assert_eq!(reloaded.len(), 3);
        assert_eq!(reloaded.entries()[2].name, "Carol");
    }

    #[test]
    fn test_parse_count_reads_leading_digits() {
        assert_eq!(parse_count(b"41"), Some(41));
        assert_eq!(parse_count(b" 12px"), Some(12));
        assert_eq!(parse_count(b"7\n"), Some(7));
        assert_eq!(parse_count(b"lots"), None);
        assert_eq!(parse_count(b""), None);
        assert_eq!(parse_count(b"-3"), None);
    }

    #[tokio::test]
    async fn test_excitement_resumes_from_stored_value() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store.set(EXCITEMENT_KEY, b"41").await.unwrap();

        let mut book = GuestBook::load(store).await;
        assert_eq!(book.increment_excitement().await, 42);
    }
}
