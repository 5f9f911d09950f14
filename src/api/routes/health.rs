//! Health Routes
//!
//! - GET /health/live - Process is up
//! - GET /health/ready - Guest book store answers reads
//! - GET /health - Store, guest book and open page summary

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /health/live
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// 503 with an error body when the store cannot be read.
pub async fn readiness(State(state): State<Arc<AppState>>) -> ApiResult<StatusCode> {
    state.guestbook.lock().await.check_store().await?;
    Ok(StatusCode::OK)
}

/// GET /health
///
/// Always 200; a failing store shows up as `degraded`.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (store_result, store_name, entries, excitement) = {
        let book = state.guestbook.lock().await;
        (
            book.check_store().await,
            book.store_name(),
            book.len(),
            book.excitement_count(),
        )
    };

    let (status, storage) = match store_result {
        Ok(()) => ("healthy", format!("{}: ok", store_name)),
        Err(e) => {
            tracing::warn!(store = store_name, error = %e, "Health check found store failing");
            ("degraded", format!("{}: {}", store_name, e))
        }
    };

    Json(HealthResponse {
        status: status.to_string(),
        storage,
        guest_book_entries: entries,
        excitement,
        live_pages: state.events.connection_count().await,
        countdown: state.countdown.now(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
