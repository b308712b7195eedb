//! Documentation route tree.
//!
//! The tree is authored once (either [`docs_routes`] or a YAML routes file
//! read by [`load_routes`]) and never mutated afterwards. Sibling order is
//! significant: it drives both sidebar order and previous/next pagination.
//!
//! # YAML Format
//!
//! ```yaml
//! - title: introduction
//!   href: /introduction
//!   no_link: true
//!   items:
//!     - title: lisa
//!       href: /lisa
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::route_table::RouteIssue;

/// A node in the documentation route tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteNode {
    /// Machine key, looked up in the dictionary's `leftbar` section.
    pub title: String,
    /// Path segment relative to the parent node (e.g., "/connect").
    pub href: String,
    /// Section heading only: groups children but has no page of its own.
    #[serde(default, alias = "noLink", skip_serializing_if = "std::ops::Not::not")]
    pub no_link: bool,
    /// Ordered child nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<RouteNode>,
}

impl RouteNode {
    /// Create a navigable leaf page.
    #[must_use]
    pub fn page(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
            no_link: false,
            items: Vec::new(),
        }
    }

    /// Create a section heading that only groups its children.
    #[must_use]
    pub fn section(
        title: impl Into<String>,
        href: impl Into<String>,
        items: Vec<RouteNode>,
    ) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
            no_link: true,
            items,
        }
    }

    /// Attach children to a node, keeping its own page navigable.
    #[must_use]
    pub fn with_items(mut self, items: Vec<RouteNode>) -> Self {
        self.items = items;
        self
    }
}

/// A flattened, navigable page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Machine key of the page title.
    pub title: String,
    /// Fully-qualified path (all ancestor hrefs concatenated).
    pub href: String,
}

/// Error type for route definitions.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// Routes file could not be read.
    #[error("Failed to read routes file {}: {source}", path.display())]
    Io {
        /// Routes file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Routes file could not be parsed.
    #[error("Invalid routes file: {0}")]
    Parse(String),
    /// Route tree failed validation.
    #[error("Invalid route table: {}", format_issues(.0))]
    Validation(Vec<RouteIssue>),
}

fn format_issues(issues: &[RouteIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parse a route tree from YAML.
///
/// # Errors
///
/// Returns `RouteError::Parse` if the YAML is malformed or not a list of nodes.
pub fn load_routes(content: &str) -> Result<Vec<RouteNode>, RouteError> {
    serde_yaml::from_str(content).map_err(|e| RouteError::Parse(e.to_string()))
}

/// Load the route tree from a YAML file, or the built-in tree when `path` is `None`.
///
/// # Errors
///
/// Returns `RouteError::Io` if the file cannot be read, or
/// `RouteError::Parse` if it is malformed.
pub fn load_route_tree(path: Option<&Path>) -> Result<Vec<RouteNode>, RouteError> {
    let Some(path) = path else {
        return Ok(docs_routes());
    };
    let content = std::fs::read_to_string(path).map_err(|source| RouteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let routes = load_routes(&content)?;
    tracing::info!(path = %path.display(), sections = routes.len(), "Loaded routes file");
    Ok(routes)
}

/// The built-in documentation route tree.
#[must_use]
pub fn docs_routes() -> Vec<RouteNode> {
    vec![
        RouteNode::section(
            "introduction",
            "/introduction",
            vec![
                RouteNode::page("lisa", "/lisa"),
                RouteNode::page("what_you_can_do", "/what-you-can-do"),
                RouteNode::page("lisa_token_overview", "/lisa-token-overview"),
                RouteNode::page("security", "/security"),
            ],
        ),
        RouteNode::section(
            "start_here",
            "/start-here",
            vec![
                RouteNode::page("requirements", "/requirements"),
                RouteNode::page("connect", "/connect"),
                RouteNode::page("first_actions", "/first-actions"),
                RouteNode::page("transaction_queue", "/transaction-queue"),
            ],
        ),
        RouteNode::section(
            "moves",
            "/moves",
            vec![
                RouteNode::page("moves_introduction", "/introduction"),
                RouteNode::page("moves_transaction_queue", "/transaction-queue"),
                RouteNode::page("swap", "/swap"),
                RouteNode::page("bridge", "/bridge"),
                RouteNode::page("send", "/send"),
                RouteNode::page("revoke", "/revoke"),
            ],
        ),
        RouteNode::section(
            "strategies",
            "/strategies",
            vec![
                RouteNode::page("strategies_overview", "/overview"),
                RouteNode::page("authoring", "/authoring"),
                RouteNode::page("run_and_monitor", "/run-and-monitor"),
                RouteNode::page("where_it_runs_and_funding", "/where-it-runs-and-funding"),
                RouteNode::page("strategies_hub", "/strategies-hub"),
                RouteNode::page("backtesting", "/backtesting"),
            ],
        ),
        RouteNode::section(
            "accounts",
            "/accounts",
            vec![
                RouteNode::page("accounts", "/accounts"),
                RouteNode::page("linked_addresses", "/linked-addresses"),
                RouteNode::page("recipient_policy", "/recipient-policy"),
                RouteNode::page("balances_and_positions", "/balances-and-positions"),
                RouteNode::page("approvals", "/approvals"),
            ],
        ),
        RouteNode::section(
            "how_it_works",
            "/how-it-works",
            vec![
                RouteNode::page("intent_to_transactions", "/intent-to-transactions"),
                RouteNode::page("intent_to_strategy_spec", "/intent-to-strategy-spec"),
                RouteNode::page("trading_engine", "/trading-engine"),
                RouteNode::page("token_and_contracts", "/token-and-contracts"),
            ],
        ),
        RouteNode::section(
            "chains_and_tokens",
            "/chains-and-tokens",
            vec![
                RouteNode::page("networks", "/networks"),
                RouteNode::page("tokens", "/tokens"),
            ],
        ),
        RouteNode::section(
            "lisa_token",
            "/lisa-token",
            vec![
                RouteNode::page("summary", "/summary"),
                RouteNode::page("access", "/access"),
                RouteNode::page("locks", "/locks"),
                RouteNode::page("fees_and_penalties", "/fees-and-penalties"),
                RouteNode::page("splits", "/splits"),
                RouteNode::page("status", "/status"),
            ],
        ),
        RouteNode::section(
            "project_updates",
            "/project-updates",
            vec![
                RouteNode::page("roadmap", "/roadmap"),
                RouteNode::page("lisa_changelog", "/changelog/lisa"),
                RouteNode::page("website_changelog", "/changelog/website"),
            ],
        ),
    ]
}
