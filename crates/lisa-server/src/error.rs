//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lisa_content::ContentError;
use lisa_site::{DictionaryError, RouteError};
use serde_json::json;

/// Error building the application state at startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Route tree could not be loaded.
    #[error(transparent)]
    Routes(#[from] RouteError),

    /// Dictionaries could not be loaded.
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
}

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No page, post or file at the given path.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Locale code is not supported.
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// Subscription email failed validation.
    #[error("Invalid email address")]
    InvalidEmail,

    /// Upstream service failed or rejected the request.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Content could not be loaded.
    #[error(transparent)]
    Content(ContentError),

    /// Unexpected internal failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ContentError> for ServerError {
    fn from(error: ContentError) -> Self {
        match error {
            ContentError::NotFound(path) => Self::NotFound(path),
            other => Self::Content(other),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::NotFound(path) => (
                StatusCode::NOT_FOUND,
                json!({"error": "Not found", "path": path}),
            ),
            Self::UnsupportedLocale(code) => (
                StatusCode::NOT_FOUND,
                json!({"error": "Unsupported locale", "locale": code}),
            ),
            Self::InvalidEmail => (
                StatusCode::BAD_REQUEST,
                json!({"error": "Invalid email address"}),
            ),
            Self::Upstream(message) => {
                tracing::warn!(error = %message, "Upstream request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({"error": "Subscription service unavailable"}),
                )
            }
            Self::Content(e) => {
                tracing::error!(error = %e, "Content error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": e.to_string()}),
                )
            }
            Self::Internal(message) => {
                tracing::error!(error = %message, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": "Internal server error"}),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ServerError::NotFound("x".to_owned()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServerError::InvalidEmail.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::Upstream("timeout".to_owned())
                .into_response()
                .status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ServerError::Internal("boom".to_owned())
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_content_not_found_maps_to_not_found() {
        let err = ServerError::from(ContentError::NotFound("docs/en/x".to_owned()));

        assert!(matches!(err, ServerError::NotFound(_)));
    }
}
