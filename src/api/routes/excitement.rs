//! Excitement Routes
//!
//! - GET /api/v1/excitement - Total "Can't Wait!" clicks
//! - POST /api/v1/excitement - Add one click

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::ExcitementResponse;
use crate::api::state::AppState;
use crate::celebration::{excitement_volley, Celebration};
use crate::websocket::ServerMessage;

/// GET /api/v1/excitement
pub async fn get_excitement(State(state): State<Arc<AppState>>) -> Json<ExcitementResponse> {
    let count = state.guestbook.lock().await.excitement_count();
    Json(ExcitementResponse {
        count,
        confetti: Vec::new(),
    })
}

/// POST /api/v1/excitement
pub async fn increment_excitement(
    State(state): State<Arc<AppState>>,
) -> Json<ExcitementResponse> {
    let count = state.guestbook.lock().await.increment_excitement().await;

    let volley = excitement_volley();
    state.events.celebrate(&volley);
    state.events.publish(ServerMessage::Excitement { count });

    Json(ExcitementResponse {
        count,
        confetti: volley,
    })
}
