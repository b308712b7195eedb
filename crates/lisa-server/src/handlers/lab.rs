//! Lab email capture endpoint.
//!
//! Validates the submitted address and forwards it as `{"email": ...}` to
//! the configured subscription service.

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use ureq::Agent;

use crate::error::ServerError;
use crate::state::AppState;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Timeout for the upstream subscription request.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// Request body for POST /api/lab/subscribe.
#[derive(Deserialize)]
pub(crate) struct SubscribeRequest {
    email: String,
}

/// Check an address has the `local@domain.tld` shape.
pub(crate) fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Handle POST /api/lab/subscribe.
pub(crate) async fn subscribe(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SubscribeRequest>,
) -> Result<impl IntoResponse, ServerError> {
    let email = request.email.trim().to_owned();
    if !is_valid_email(&email) {
        return Err(ServerError::InvalidEmail);
    }

    let url = state.subscribe_url.clone();
    tokio::task::spawn_blocking(move || forward_subscription(&url, &email))
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))??;

    tracing::info!("Lab subscription forwarded");
    Ok((StatusCode::OK, Json(json!({"ok": true}))))
}

/// Post the address to the subscription service (blocking).
fn forward_subscription(url: &str, email: &str) -> Result<(), ServerError> {
    let agent: Agent = Agent::config_builder()
        .timeout_global(Some(UPSTREAM_TIMEOUT))
        .build()
        .into();

    agent
        .post(url)
        .send_json(json!({ "email": email }))
        .map_err(|e| ServerError::Upstream(e.to_string()))?;

    Ok(())
}
