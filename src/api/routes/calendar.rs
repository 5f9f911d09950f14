//! Calendar Route
//!
//! - GET /calendar.ics - Download the wedding as an iCalendar file

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::IntoResponse,
};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::calendar::ICS_CONTENT_TYPE;

/// GET /calendar.ics
///
/// The event URL is the configured public address, falling back to the
/// `Host` the guest reached us on.
pub async fn download_calendar(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let url = state.config.public_url.clone().or_else(|| {
        headers
            .get(header::HOST)
            .and_then(|host| host.to_str().ok())
            .map(|host| format!("http://{}/", host))
    });

    let ics = state.event.calendar_event(&state.site, url).to_ics();
    let disposition = format!(
        "attachment; filename=\"{}\"",
        state.event.calendar_file_name
    );

    tracing::debug!(bytes = ics.len(), "Serving calendar file");

    (
        [
            (header::CONTENT_TYPE, ICS_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        ics,
    )
}
