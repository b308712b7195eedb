//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::{locale, security};
use crate::state::AppState;
use crate::static_files;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        .route("/api/site", get(handlers::site::get_site))
        .route("/api/navigation", get(handlers::navigation::get_navigation))
        .route(
            "/api/dictionaries/{lang}",
            get(handlers::dictionary::get_dictionary),
        )
        .route("/api/docs/{lang}", get(handlers::docs::get_docs_root))
        .route("/api/docs/{lang}/{*slug}", get(handlers::docs::get_doc))
        .route("/api/hq/{lang}", get(handlers::hq::list_posts))
        .route("/api/hq/{lang}/{slug}", get(handlers::hq::get_post))
        .route("/api/lab/subscribe", post(handlers::lab::subscribe));

    let seo_routes = Router::new()
        .route("/sitemap.xml", get(handlers::seo::get_sitemap))
        .route("/robots.txt", get(handlers::seo::get_robots));

    let router = Router::new()
        .merge(api_routes)
        .merge(seo_routes)
        .merge(static_files::static_router())
        .layer(from_fn_with_state(
            Arc::clone(&state),
            locale::locale_redirect,
        ));

    // Security headers wrap every response, redirects included
    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::csp_layer())
                .layer(security::referrer_policy_layer())
                .layer(security::permissions_policy_layer())
                .layer(security::hsts_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}
