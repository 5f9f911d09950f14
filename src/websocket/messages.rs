//! WebSocket Message Types
//!
//! Messages exchanged between an open page and the server.

use serde::{Deserialize, Serialize};

use crate::celebration::ConfettiBurst;
use crate::countdown::CountdownState;
use crate::guestbook::GuestBookEntry;

/// Messages sent from the page to the server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Ping for keepalive
    Ping,
}

/// Messages sent from the server to the page
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established, with the state needed for a first render
    Connected {
        connection_id: String,
        countdown: CountdownState,
        excitement: u64,
        guest_book_count: usize,
    },
    /// Fresh countdown value
    Countdown(CountdownState),
    /// Play these confetti bursts
    Confetti { bursts: Vec<ConfettiBurst> },
    /// Someone signed the guest book
    GuestBookEntry {
        entry: GuestBookEntry,
        guest_book_count: usize,
    },
    /// Excitement counter changed
    Excitement { count: u64 },
    /// Pong response to ping
    Pong,
    /// Error message
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_message_is_flat() {
        let msg = ServerMessage::Countdown(CountdownState::from_millis(86_400_000));
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["type"], "countdown");
        assert_eq!(json["days"], 1);
        assert_eq!(json["seconds"], 0);
    }

    #[test]
    fn test_excitement_message() {
        let json = serde_json::to_string(&ServerMessage::Excitement { count: 3 }).unwrap();
        assert_eq!(json, r#"{"type":"excitement","count":3}"#);
    }

    #[test]
    fn test_parse_ping() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type":"ping"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Ping));

        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"subscribe"}"#).is_err());
    }
}
