//! Guest Book Routes
//!
//! - GET /api/v1/guestbook - Entries, newest first
//! - POST /api/v1/guestbook - Sign the guest book

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{GuestBookResponse, SignRequest, SignResponse};
use crate::api::state::AppState;
use crate::celebration::{guest_book_burst, Celebration};
use crate::websocket::ServerMessage;

/// GET /api/v1/guestbook
pub async fn list_entries(State(state): State<Arc<AppState>>) -> Json<GuestBookResponse> {
    let book = state.guestbook.lock().await;
    Json(GuestBookResponse {
        count: book.len(),
        entries: book.entries().to_vec(),
    })
}

/// POST /api/v1/guestbook
///
/// 201 with the new entry, or 204 when the name or message is empty.
/// Storage failures are not reported; the entry still shows this session.
pub async fn sign(State(state): State<Arc<AppState>>, Json(req): Json<SignRequest>) -> Response {
    let (entry, count) = {
        let mut book = state.guestbook.lock().await;
        match book.submit(&req.name, &req.message, req.photo).await {
            Some(entry) => (entry, book.len()),
            None => return StatusCode::NO_CONTENT.into_response(),
        }
    };

    let burst = guest_book_burst();
    state.events.celebrate(std::slice::from_ref(&burst));
    state.events.publish(ServerMessage::GuestBookEntry {
        entry: entry.clone(),
        guest_book_count: count,
    });

    (
        StatusCode::CREATED,
        Json(SignResponse {
            entry,
            confetti: burst,
        }),
    )
        .into_response()
}
