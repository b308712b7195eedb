//! Site API endpoint.
//!
//! Returns site identity, supported locales and the home page head data.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use lisa_site::{Locale, switch_locale};
use serde::{Deserialize, Serialize};

use crate::error::ServerError;
use crate::handlers::{HeadMeta, cached_json};
use crate::state::AppState;
use crate::structured_data;

/// Query parameters for GET /api/site.
#[derive(Deserialize)]
pub(crate) struct SiteQuery {
    lang: Option<String>,
    /// Current page path; each locale entry links to its translation.
    path: Option<String>,
}

/// Supported locale entry for the language selector.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LocaleInfo {
    code: &'static str,
    name: &'static str,
    og_locale: &'static str,
    href: String,
}

/// Response for GET /api/site.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SiteResponse {
    name: String,
    base_url: String,
    default_locale: &'static str,
    locales: Vec<LocaleInfo>,
    meta: HeadMeta,
    json_ld: Vec<serde_json::Value>,
}

/// Handle GET /api/site.
pub(crate) async fn get_site(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SiteQuery>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let locale = match query.lang.as_deref() {
        Some(code) => AppState::locale(code)?,
        None => state.default_locale,
    };
    let dict = state.dictionaries.get(locale);
    let in_language = locale.og_locale().replace('_', "-");
    let current = query.path.unwrap_or_else(|| format!("/{locale}"));

    let response = SiteResponse {
        name: state.site_name.clone(),
        base_url: state.base_url.clone(),
        default_locale: state.default_locale.code(),
        locales: Locale::ALL
            .iter()
            .map(|l| LocaleInfo {
                code: l.code(),
                name: l.display_name(),
                og_locale: l.og_locale(),
                href: switch_locale(&current, *l),
            })
            .collect(),
        meta: HeadMeta {
            title: dict
                .get("metadata.title")
                .map_or_else(|| state.site_name.clone(), str::to_owned),
            description: dict.get("metadata.description").unwrap_or_default().to_owned(),
            canonical: state.url(&format!("/{locale}")),
            alternates: state.alternates(""),
            og_locale: locale.og_locale(),
            og_type: "website",
        },
        json_ld: vec![
            structured_data::organization(&state.site_name, &state.base_url),
            structured_data::website(&state.site_name, &state.base_url, locale.code(), &in_language),
        ],
    };

    cached_json(&state, &headers, &response)
}
