//! Crawler endpoints: sitemap.xml and robots.txt.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use chrono::Utc;

use crate::error::ServerError;
use crate::sitemap::{render_sitemap, robots_txt, sitemap_entries};
use crate::state::AppState;

/// Handle GET /sitemap.xml.
pub(crate) async fn get_sitemap(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServerError> {
    let entries = sitemap_entries(&state.routes, &state.content, &state.base_url, Utc::now());
    tracing::debug!(urls = entries.len(), "Rendering sitemap");
    let xml = render_sitemap(&entries).map_err(|e| ServerError::Internal(e.to_string()))?;

    Ok((
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        xml,
    ))
}

/// Handle GET /robots.txt.
pub(crate) async fn get_robots(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        robots_txt(&state.base_url),
    )
}
