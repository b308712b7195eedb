//! Dictionary API endpoint.
//!
//! Serves the translation table of a locale to the frontend.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;

use crate::error::ServerError;
use crate::handlers::cached_json;
use crate::state::AppState;

/// Handle GET /api/dictionaries/{lang}.
pub(crate) async fn get_dictionary(
    Path(lang): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let locale = AppState::locale(&lang)?;
    cached_json(&state, &headers, state.dictionaries.get(locale).as_value())
}
