//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::celebration::ConfettiBurst;
use crate::countdown::CountdownState;
use crate::guestbook::GuestBookEntry;

// ============================================
// GUEST BOOK DTOs
// ============================================

/// Guest book signature. Missing fields count as empty.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SignRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub message: String,
    /// Selfie as a data URL, if the page finished encoding one
    #[serde(default)]
    pub photo: Option<String>,
}

/// Accepted signature
#[derive(Debug, Serialize, Deserialize)]
pub struct SignResponse {
    pub entry: GuestBookEntry,
    pub confetti: ConfettiBurst,
}

/// All entries, newest first
#[derive(Debug, Serialize, Deserialize)]
pub struct GuestBookResponse {
    pub count: usize,
    pub entries: Vec<GuestBookEntry>,
}

// ============================================
// EXCITEMENT DTOs
// ============================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ExcitementResponse {
    pub count: u64,
    /// Volley to play, present only in reply to a click
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub confetti: Vec<ConfettiBurst>,
}

// ============================================
// COUNTDOWN DTOs
// ============================================

#[derive(Debug, Serialize, Deserialize)]
pub struct CountdownResponse {
    /// Target instant, RFC 3339
    pub target: String,
    #[serde(flatten)]
    pub remaining: CountdownState,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: String,
    /// Store name and its read check
    pub storage: String,
    pub guest_book_entries: usize,
    pub excitement: u64,
    /// Open WebSocket connections
    pub live_pages: usize,
    pub countdown: CountdownState,
    pub uptime_seconds: u64,
    pub version: String,
}
