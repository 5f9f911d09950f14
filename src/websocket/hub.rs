//! Event Hub
//!
//! Fans site events (confetti, new guest book entries, excitement clicks) out
//! to every open page through a tokio broadcast channel, and tracks how many
//! pages are connected.

use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use super::messages::ServerMessage;
use crate::celebration::{Celebration, ConfettiBurst};

/// Unique identifier for a WebSocket connection
pub type ConnectionId = String;

/// Configuration for the event hub
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Maximum number of concurrent connections
    pub max_connections: usize,
    /// Capacity of the broadcast channel
    pub broadcast_capacity: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            max_connections: 1000,
            broadcast_capacity: 256,
        }
    }
}

/// Broadcasts events to all connected pages
pub struct EventHub {
    connections: Arc<RwLock<HashSet<ConnectionId>>>,
    broadcast_tx: broadcast::Sender<ServerMessage>,
    config: HubConfig,
}

impl EventHub {
    pub fn new(config: HubConfig) -> Self {
        let (broadcast_tx, _) = broadcast::channel(config.broadcast_capacity);

        Self {
            connections: Arc::new(RwLock::new(HashSet::new())),
            broadcast_tx,
            config,
        }
    }

    /// Register a new connection.
    ///
    /// Returns the connection ID and a receiver for broadcast events, or an
    /// error if the connection limit has been reached.
    pub async fn register(
        &self,
    ) -> Result<(ConnectionId, broadcast::Receiver<ServerMessage>), HubError> {
        let mut connections = self.connections.write().await;
        if connections.len() >= self.config.max_connections {
            return Err(HubError::TooManyConnections);
        }

        let id = Uuid::new_v4().to_string();
        connections.insert(id.clone());

        tracing::info!(connection_id = %id, "WebSocket connected");
        Ok((id, self.broadcast_tx.subscribe()))
    }

    pub async fn unregister(&self, id: &str) {
        self.connections.write().await.remove(id);
        tracing::info!(connection_id = %id, "WebSocket disconnected");
    }

    /// Send an event to every connected page, returning how many received it
    pub fn publish(&self, message: ServerMessage) -> usize {
        match self.broadcast_tx.send(message) {
            Ok(receivers) => {
                tracing::trace!(receivers, "Broadcast event");
                receivers
            }
            // No page is open
            Err(_) => 0,
        }
    }

    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new(HubConfig::default())
    }
}

impl Celebration for EventHub {
    fn celebrate(&self, bursts: &[ConfettiBurst]) {
        self.publish(ServerMessage::Confetti {
            bursts: bursts.to_vec(),
        });
    }
}

/// Hub errors
#[derive(Error, Debug)]
pub enum HubError {
    #[error("Too many connections")]
    TooManyConnections,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::celebration::guest_book_burst;

    #[tokio::test]
    async fn test_register_and_unregister() {
        let hub = EventHub::default();

        let (id, _rx) = hub.register().await.unwrap();
        assert_eq!(hub.connection_count().await, 1);

        hub.unregister(&id).await;
        assert_eq!(hub.connection_count().await, 0);
    }

    #[tokio::test]
    async fn test_connection_limit() {
        let hub = EventHub::new(HubConfig {
            max_connections: 1,
            broadcast_capacity: 8,
        });

        let _first = hub.register().await.unwrap();
        assert!(matches!(
            hub.register().await,
            Err(HubError::TooManyConnections)
        ));
    }

    #[tokio::test]
    async fn test_publish_without_pages() {
        let hub = EventHub::default();
        assert_eq!(hub.publish(ServerMessage::Excitement { count: 1 }), 0);
    }

    #[tokio::test]
    async fn test_celebrate_reaches_pages() {
        let hub = EventHub::default();
        let (_a, mut rx_a) = hub.register().await.unwrap();
        let (_b, mut rx_b) = hub.register().await.unwrap();

        hub.celebrate(&[guest_book_burst()]);

        for rx in [&mut rx_a, &mut rx_b] {
            match rx.recv().await.unwrap() {
                ServerMessage::Confetti { bursts } => {
                    assert_eq!(bursts, vec![guest_book_burst()]);
                }
                other => panic!("unexpected message: {:?}", other),
            }
        }
    }
}
