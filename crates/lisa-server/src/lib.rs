//! HTTP server for the LiSA website and documentation.
//!
//! This crate provides a native Rust HTTP server using axum, serving:
//! - JSON API endpoints for documentation pages, navigation, HQ posts and
//!   site metadata
//! - The Lab subscription proxy
//! - `sitemap.xml` and `robots.txt`
//! - Static files for the frontend SPA
//!
//! Page requests without a locale prefix are redirected to the visitor's
//! preferred locale before reaching any handler.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use lisa_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         contents_dir: PathBuf::from("contents"),
//!         public_dir: Some(PathBuf::from("frontend/dist")),
//!         version: "1.0.0".to_owned(),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum server (lisa-server)
//!                        │
//!                        ├─► locale redirect middleware
//!                        │
//!                        ├─► API routes ──► RouteTable / Dictionaries (lisa-site)
//!                        │                 ContentStore (lisa-content)
//!                        │
//!                        ├─► Lab subscribe ──► upstream service (ureq)
//!                        │
//!                        └─► Static files (tower-http ServeDir)
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
pub mod sitemap;
mod state;
mod static_files;
mod structured_data;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use lisa_content::ContentStore;
use lisa_site::{Dictionaries, Locale, RouteTable, load_route_tree};
use state::AppState;

pub use error::{ServerError, StartupError};

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Content root (`docs/` and `hq/` trees).
    pub contents_dir: PathBuf,
    /// Directory of dictionary overrides.
    pub dictionaries_dir: Option<PathBuf>,
    /// Route tree YAML file (`None` uses the built-in tree).
    pub routes_file: Option<PathBuf>,
    /// Built frontend directory (`None` disables static serving).
    pub public_dir: Option<PathBuf>,
    /// Public base URL without trailing slash.
    pub base_url: String,
    /// Site name.
    pub site_name: String,
    /// Locale used when a request carries no preference.
    pub default_locale: Locale,
    /// Lab subscription endpoint.
    pub subscribe_url: String,
    /// Application version (for cache invalidation).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
            contents_dir: PathBuf::from("contents"),
            dictionaries_dir: None,
            routes_file: None,
            public_dir: None,
            base_url: "https://hey-lisa.com".to_owned(),
            site_name: "Hey LiSA".to_owned(),
            default_locale: Locale::default(),
            subscribe_url: "https://hey-lisa.com/api/subscribe".to_owned(),
            version: String::new(),
        }
    }
}

/// Build the shared application state from configuration.
fn build_state(config: &ServerConfig) -> Result<AppState, StartupError> {
    let routes = RouteTable::new(load_route_tree(config.routes_file.as_deref())?);
    for issue in routes.issues() {
        tracing::warn!(issue = %issue, "Route tree problem");
    }

    let mut dictionaries = Dictionaries::builtin()?;
    if let Some(dir) = &config.dictionaries_dir {
        dictionaries = dictionaries.with_overrides(dir)?;
    }

    tracing::debug!(pages = routes.pages().len(), "Route table ready");

    Ok(AppState {
        routes,
        dictionaries,
        content: ContentStore::new(config.contents_dir.clone()),
        base_url: config.base_url.trim_end_matches('/').to_owned(),
        site_name: config.site_name.clone(),
        default_locale: config.default_locale,
        subscribe_url: config.subscribe_url.clone(),
        public_dir: config.public_dir.clone(),
        version: config.version.clone(),
    })
}

/// Create the application router without binding a socket.
///
/// # Errors
///
/// Returns an error if the route tree or dictionaries cannot be loaded.
pub fn create_app(config: &ServerConfig) -> Result<Router, StartupError> {
    let state = Arc::new(build_state(config)?);
    Ok(app::create_router(state))
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_app(&config)?;

    // Bind and run server
    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, contents = %config.contents_dir.display(), "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        return;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from LiSA config.
///
/// # Arguments
///
/// * `config` - LiSA configuration
/// * `version` - Application version
#[must_use]
pub fn server_config_from_lisa_config(config: &lisa_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        contents_dir: config.content_resolved.contents_dir.clone(),
        dictionaries_dir: config.content_resolved.dictionaries_dir.clone(),
        routes_file: config.content_resolved.routes_file.clone(),
        public_dir: config.content_resolved.public_dir.clone(),
        base_url: config.site.base_url.clone(),
        site_name: config.site.name.clone(),
        default_locale: config.site.default_locale(),
        subscribe_url: config.lab.subscribe_url.clone(),
        version,
    }
}
