//! Save-the-date REST API
//!
//! HTTP layer for the wedding page, built with Axum.
//!
//! # Endpoints
//!
//! ## Countdown
//! - `GET /api/v1/countdown` - Time remaining until the ceremony
//!
//! ## Guest Book
//! - `GET /api/v1/guestbook` - Entries, newest first
//! - `POST /api/v1/guestbook` - Sign the guest book
//!
//! ## Excitement
//! - `GET /api/v1/excitement` - Click total
//! - `POST /api/v1/excitement` - "Can't Wait!" click
//!
//! ## Content
//! - `GET /api/v1/site` - All page copy
//! - `GET /api/v1/tabs/:tab` - Copy for one tab
//! - `GET /calendar.ics` - Calendar download
//! - `GET /rsvp` - Redirect to the RSVP form
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! ## WebSocket
//! - `GET /ws` - Live countdown, confetti and guest book updates
//!
//! # Example
//!
//! ```rust,ignore
//! use save_the_date::api::{serve, AppState};
//! use save_the_date::config::Config;
//! use save_the_date::guestbook::GuestBook;
//! use save_the_date::storage::{FileStore, FileStoreConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let store = FileStore::open(FileStoreConfig::new(&config.storage.data_dir)).await?;
//!     let guestbook = GuestBook::load(Arc::new(store)).await;
//!     let countdown = config.event.countdown()?;
//!
//!     let state = AppState::new(guestbook, countdown, config.event, config.site, config.api.clone());
//!     serve(state, &config.api).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ApiConfig;
use crate::websocket::websocket_handler;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/countdown", get(routes::countdown::get_countdown))
        .route(
            "/guestbook",
            get(routes::guestbook::list_entries).post(routes::guestbook::sign),
        )
        .route(
            "/excitement",
            get(routes::excitement::get_excitement)
                .post(routes::excitement::increment_excitement),
        )
        .route("/site", get(routes::site::get_site))
        .route("/tabs/:tab", get(routes::site::get_tab));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);
    let body_limit = DefaultBodyLimit::max(state.config.max_body_bytes);

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .route("/calendar.ics", get(routes::calendar::download_calendar))
        .route("/rsvp", get(routes::site::rsvp_redirect))
        .route("/ws", get(websocket_handler))
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Permissive unless specific origins are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Save-the-date page listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Save-the-date page shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
