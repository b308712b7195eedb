//! Static file serving.
//!
//! Serves the built frontend from the configured public directory. Paths
//! without a file extension fall back to `index.html` so client-side routes
//! resolve; everything else that is missing is a JSON 404.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::error::ServerError;
use crate::state::AppState;

/// Create router for static file serving with SPA fallback.
pub(crate) fn static_router() -> Router<Arc<AppState>> {
    Router::new().fallback(serve_static)
}

/// Whether a request path should fall back to the SPA entry point.
fn is_spa_route(path: &str) -> bool {
    let path = path.trim_start_matches('/');
    !path.starts_with("api/")
        && path
            .rsplit('/')
            .next()
            .is_none_or(|last| !last.contains('.'))
}

/// Serve a file from the public directory, or `index.html` for SPA routes.
async fn serve_static(State(state): State<Arc<AppState>>, req: Request<Body>) -> Response {
    let path = req.uri().path().to_owned();
    let Some(public_dir) = state.public_dir.clone() else {
        return ServerError::NotFound(path).into_response();
    };

    let Ok(response) = ServeDir::new(&public_dir).oneshot(req).await;
    if response.status() != StatusCode::NOT_FOUND {
        return response.map(Body::new);
    }

    if is_spa_route(&path) {
        let index_path = public_dir.join("index.html");
        if let Ok(content) = tokio::fs::read_to_string(&index_path).await {
            return Html(content).into_response();
        }
    }

    ServerError::NotFound(path).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_spa_route() {
        assert!(is_spa_route("/"));
        assert!(is_spa_route("/en/docs/moves/swap"));
        assert!(is_spa_route("/fr/hq"));
        assert!(!is_spa_route("/assets/app.js"));
        assert!(!is_spa_route("/favicon.png"));
        assert!(!is_spa_route("/api/unknown"));
    }

    #[test]
    fn test_is_spa_route_dot_in_directory() {
        assert!(is_spa_route("/v1.2/page"));
    }
}
