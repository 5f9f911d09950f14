//! WebSocket Handler
//!
//! Each open page gets its own countdown ticker plus the shared event
//! stream. The ticker lives exactly as long as the socket.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

use super::messages::{ClientMessage, ServerMessage};
use crate::api::AppState;
use crate::countdown::CountdownTicker;

type Sender = SplitSink<WebSocket, Message>;

/// WebSocket upgrade handler
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an established WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    let (connection_id, mut events) = match state.events.register().await {
        Ok(registered) => registered,
        Err(e) => {
            tracing::error!(error = %e, "Failed to register WebSocket connection");
            let _ = send(
                &mut sender,
                &ServerMessage::Error {
                    message: e.to_string(),
                },
            )
            .await;
            return;
        }
    };

    let ticker = CountdownTicker::start(state.countdown, state.tick_interval);
    let mut countdown = ticker.subscribe();

    let connected = {
        let book = state.guestbook.lock().await;
        ServerMessage::Connected {
            connection_id: connection_id.clone(),
            countdown: *countdown.borrow_and_update(),
            excitement: book.excitement_count(),
            guest_book_count: book.len(),
        }
    };

    if send(&mut sender, &connected).await {
        loop {
            let keep_open = tokio::select! {
                changed = countdown.changed() => match changed {
                    Ok(()) => {
                        let remaining = *countdown.borrow_and_update();
                        send(&mut sender, &ServerMessage::Countdown(remaining)).await
                    }
                    Err(_) => false,
                },
                event = events.recv() => match event {
                    Ok(message) => send(&mut sender, &message).await,
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(connection_id = %connection_id, skipped, "Page fell behind on events");
                        true
                    }
                    Err(RecvError::Closed) => false,
                },
                incoming = receiver.next() => match incoming {
                    Some(Ok(message)) => handle_ws_message(&mut sender, &connection_id, message).await,
                    Some(Err(e)) => {
                        tracing::debug!(connection_id = %connection_id, error = %e, "WebSocket receive error");
                        false
                    }
                    None => false,
                },
            };

            if !keep_open {
                break;
            }
        }
    } else {
        tracing::error!(connection_id = %connection_id, "Failed to send connected message");
    }

    ticker.stop().await;
    state.events.unregister(&connection_id).await;
}

/// Serialize and send one message. Returns false if the socket is gone.
async fn send(sender: &mut Sender, message: &ServerMessage) -> bool {
    match serde_json::to_string(message) {
        Ok(text) => sender.send(Message::Text(text)).await.is_ok(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize message");
            true
        }
    }
}

/// Handle a received WebSocket message
///
/// Returns false if the connection should be closed.
async fn handle_ws_message(sender: &mut Sender, connection_id: &str, message: Message) -> bool {
    match message {
        Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
            Ok(ClientMessage::Ping) => send(sender, &ServerMessage::Pong).await,
            Err(e) => {
                tracing::debug!(
                    connection_id = %connection_id,
                    error = %e,
                    "Invalid client message"
                );
                send(
                    sender,
                    &ServerMessage::Error {
                        message: format!("Invalid message format: {}", e),
                    },
                )
                .await
            }
        },
        Message::Binary(_) => {
            send(
                sender,
                &ServerMessage::Error {
                    message: "Binary messages not supported".to_string(),
                },
            )
            .await
        }
        // Axum answers pings itself
        Message::Ping(_) | Message::Pong(_) => true,
        Message::Close(_) => {
            tracing::debug!(connection_id = %connection_id, "Client requested close");
            false
        }
    }
}
