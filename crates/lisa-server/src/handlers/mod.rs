//! HTTP request handlers.

pub(crate) mod dictionary;
pub(crate) mod docs;
pub(crate) mod hq;
pub(crate) mod lab;
pub(crate) mod navigation;
pub(crate) mod seo;
pub(crate) mod site;

use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use md5::{Digest, Md5};
use serde::Serialize;

use crate::error::ServerError;
use crate::state::AppState;

/// Link to a localized page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct PageLink {
    /// Localized title.
    pub(crate) title: String,
    /// Locale-prefixed path.
    pub(crate) href: String,
}

/// Head metadata for a page (title, canonical URL, alternates).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HeadMeta {
    /// Document title.
    pub(crate) title: String,
    /// Meta description.
    pub(crate) description: String,
    /// Canonical absolute URL.
    pub(crate) canonical: String,
    /// Absolute URL per locale code, plus `x-default`.
    pub(crate) alternates: std::collections::BTreeMap<String, String>,
    /// `OpenGraph` locale tag.
    pub(crate) og_locale: &'static str,
    /// `OpenGraph` object type.
    pub(crate) og_type: &'static str,
}

/// Locale-prefixed path of a documentation route (`/en/docs/moves/swap`).
pub(crate) fn docs_href(lang: &str, route: &str) -> String {
    format!("/{lang}/docs{route}")
}

/// Serialize `body` as JSON with an `ETag`, answering 304 when the client
/// already holds the same representation.
pub(crate) fn cached_json<T: Serialize>(
    state: &AppState,
    headers: &HeaderMap,
    body: &T,
) -> Result<Response, ServerError> {
    let bytes = serde_json::to_vec(body).map_err(|e| ServerError::Internal(e.to_string()))?;
    let etag = compute_etag(&state.version, &bytes);

    if etag_matches(headers, &etag) {
        return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
    }

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            ),
            (header::CACHE_CONTROL, HeaderValue::from_static("public, max-age=60")),
        ],
        [(header::ETAG, etag)],
        bytes,
    )
        .into_response())
}

/// Check `If-None-Match` against an entity tag (lists and `*` accepted).
fn etag_matches(headers: &HeaderMap, etag: &str) -> bool {
    headers
        .get_all(header::IF_NONE_MATCH)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .any(|candidate| candidate == "*" || candidate.trim_start_matches("W/") == etag)
}

/// Compute `ETag` from version and content.
///
/// Uses MD5 hash truncated to 64 bits (16 hex chars) - sufficient for
/// cache invalidation with negligible collision probability.
fn compute_etag(version: &str, content: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(version.as_bytes());
    hasher.update(b":");
    hasher.update(content);
    format!("\"{}\"", &hex::encode(hasher.finalize())[..16])
}
