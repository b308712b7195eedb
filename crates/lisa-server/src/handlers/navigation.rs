//! Navigation API endpoint.
//!
//! Returns the localized sidebar tree for the documentation site.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use lisa_site::NavItem;
use serde::{Deserialize, Serialize};

use crate::error::ServerError;
use crate::state::AppState;

/// Query parameters for GET /api/navigation.
#[derive(Deserialize)]
pub(crate) struct NavigationQuery {
    /// Locale code (default locale when absent).
    lang: Option<String>,
}

/// Response for GET /api/navigation.
#[derive(Serialize)]
pub(crate) struct NavigationResponse {
    /// Locale of the titles.
    lang: &'static str,
    /// Navigation tree items.
    items: Vec<NavItem>,
}

/// Handle GET /api/navigation.
pub(crate) async fn get_navigation(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NavigationQuery>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let locale = match query.lang.as_deref() {
        Some(code) => AppState::locale(code)?,
        None => state.default_locale,
    };

    let items = state.routes.navigation(state.dictionaries.get(locale));
    let response = NavigationResponse {
        lang: locale.code(),
        items,
    };
    super::cached_json(&state, &headers, &response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_response_serialization() {
        let response = NavigationResponse {
            lang: "en",
            items: vec![NavItem {
                title: "Moves".to_owned(),
                key: "moves".to_owned(),
                href: "/moves".to_owned(),
                no_link: true,
                children: vec![],
            }],
        };

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["lang"], "en");
        assert_eq!(json["items"][0]["title"], "Moves");
        assert_eq!(json["items"][0]["href"], "/moves");
        assert_eq!(json["items"][0]["noLink"], true);
    }
}
