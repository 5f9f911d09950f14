//! Countdown Route
//!
//! - GET /api/v1/countdown - Time remaining until the ceremony

use axum::{extract::State, Json};
use chrono::SecondsFormat;
use std::sync::Arc;

use crate::api::dto::CountdownResponse;
use crate::api::state::AppState;

/// GET /api/v1/countdown
pub async fn get_countdown(State(state): State<Arc<AppState>>) -> Json<CountdownResponse> {
    Json(CountdownResponse {
        target: state
            .countdown
            .target()
            .to_rfc3339_opts(SecondsFormat::Secs, true),
        remaining: state.countdown.now(),
    })
}
