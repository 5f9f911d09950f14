//! Guest book entry type

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A message left by a guest. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestBookEntry {
    /// Creation time in milliseconds since the epoch, unique within a book
    pub id: i64,
    pub name: String,
    pub message: String,
    /// Selfie as a base64 `data:` URL
    #[serde(default)]
    pub photo: Option<String>,
    /// ISO-8601 creation time, e.g. `2026-10-24T16:00:00.000Z`
    pub timestamp: String,
}

impl GuestBookEntry {
    pub fn new(
        name: impl Into<String>,
        message: impl Into<String>,
        photo: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: created_at.timestamp_millis(),
            name: name.into(),
            message: message.into(),
            photo,
            timestamp: created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Parsed creation time, if the stored timestamp is well formed
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn has_photo(&self) -> bool {
        self.photo.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_entry_fields() {
        let at = Utc.timestamp_millis_opt(1_792_857_600_123).unwrap();
        let entry = GuestBookEntry::new("Alice", "Congrats!", None, at);

        assert_eq!(entry.id, 1_792_857_600_123);
        assert_eq!(entry.timestamp, "2026-10-24T16:00:00.123Z");
        assert_eq!(entry.created_at(), Some(at));
        assert!(!entry.has_photo());
    }

    #[test]
    fn test_json_shape() {
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let entry = GuestBookEntry::new("Bob", "Cheers", None, at);
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["name"], "Bob");
        assert_eq!(json["message"], "Cheers");
        assert!(json["photo"].is_null());
        assert_eq!(json["timestamp"], "2026-01-02T03:04:05.000Z");
    }

    #[test]
    fn test_reads_entry_without_photo_field() {
        let json = r#"{"id":1,"name":"Cara","message":"Hi","timestamp":"2026-01-01T00:00:00.000Z"}"#;
        let entry: GuestBookEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.photo, None);
        assert_eq!(entry.id, 1);
    }
}
