//! WebSocket Live Updates
//!
//! Keeps open pages in sync with the server.
//!
//! ## Architecture
//!
//! - **EventHub**: broadcasts confetti, guest book and excitement events
//! - **Handler**: upgrades the connection and runs a countdown ticker per page
//! - **Messages**: client and server message formats
//!
//! ## Example
//!
//! ```javascript
//! // Browser
//! const ws = new WebSocket('ws://localhost:8080/ws');
//!
//! ws.onmessage = (event) => {
//!   const msg = JSON.parse(event.data);
//!   if (msg.type === 'countdown') renderCountdown(msg);
//!   if (msg.type === 'confetti') msg.bursts.forEach(confetti);
//! };
//! ```

mod handler;
mod hub;
mod messages;

pub use handler::websocket_handler;
pub use hub::{ConnectionId, EventHub, HubConfig, HubError};
pub use messages::{ClientMessage, ServerMessage};
