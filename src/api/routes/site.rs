//! Site Content Routes
//!
//! - GET /api/v1/site - All page copy
//! - GET /api/v1/tabs/:tab - Copy for one tab
//! - GET /rsvp - Redirect to the RSVP form

use axum::{
    extract::{Path, State},
    response::Redirect,
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::content::{SiteContent, Tab};

/// GET /api/v1/site
pub async fn get_site(State(state): State<Arc<AppState>>) -> Json<SiteContent> {
    Json(state.site.as_ref().clone())
}

/// GET /api/v1/tabs/:tab
pub async fn get_tab(
    State(state): State<Arc<AppState>>,
    Path(tab): Path<String>,
) -> ApiResult<Json<Value>> {
    let tab: Tab = tab.parse()?;

    let mut body = state.site.tab(tab);

    if tab == Tab::GuestBook {
        let book = state.guestbook.lock().await;
        if let Some(content) = body.get_mut("content").and_then(Value::as_object_mut) {
            content.insert("count".to_string(), Value::from(book.len()));
            let entries = serde_json::to_value(book.entries())
                .map_err(|e| ApiError::Internal(e.to_string()))?;
            content.insert("entries".to_string(), entries);
        }
    }

    Ok(Json(body))
}

/// GET /rsvp
pub async fn rsvp_redirect(State(state): State<Arc<AppState>>) -> Redirect {
    Redirect::temporary(&state.site.rsvp.form_url)
}
