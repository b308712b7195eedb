//! Locale redirect middleware.
//!
//! Every page path must start with a locale segment. Requests without one
//! are redirected (307) to the same path under the preferred locale:
//!
//! 1. `lang` cookie, if it names a supported locale
//! 2. first supported language of `Accept-Language`, in header order
//! 3. the configured default locale
//!
//! Paths containing a `.`, paths under a reserved prefix, and paths already
//! carrying a two-letter locale pass through untouched.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use lisa_site::{Locale, localized_path, path_has_locale};

use crate::state::AppState;

/// Path prefixes never rewritten.
const RESERVED_PREFIXES: [&str; 4] = ["/api", "/assets", "/_next", "/.well-known"];

/// Cookie holding the visitor's chosen locale.
const LOCALE_COOKIE: &str = "lang";

/// Check whether a request path must be redirected to a localized path.
pub(crate) fn needs_locale(path: &str) -> bool {
    if path.contains('.') || path_has_locale(path) {
        return false;
    }
    !RESERVED_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

/// Pick the redirect locale from request headers.
pub(crate) fn preferred_locale(headers: &HeaderMap, default: Locale) -> Locale {
    cookie_locale(headers)
        .or_else(|| {
            headers
                .get_all(header::ACCEPT_LANGUAGE)
                .iter()
                .filter_map(|value| value.to_str().ok())
                .find_map(Locale::negotiate)
        })
        .unwrap_or(default)
}

fn cookie_locale(headers: &HeaderMap) -> Option<Locale> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == LOCALE_COOKIE)
        .and_then(|(_, value)| Locale::from_code(value.trim_matches('"')))
}

/// Redirect locale-less page requests.
pub(crate) async fn locale_redirect(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    if !needs_locale(path) {
        return next.run(request).await;
    }

    let locale = preferred_locale(request.headers(), state.default_locale);
    let mut target = localized_path(locale, path);
    if let Some(query) = request.uri().query() {
        target.push('?');
        target.push_str(query);
    }

    tracing::debug!(from = %request.uri(), to = %target, "Locale redirect");
    Redirect::temporary(&target).into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(pairs: &[(header::HeaderName, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_needs_locale() {
        assert!(needs_locale("/"));
        assert!(needs_locale("/docs/moves/swap"));
        assert!(needs_locale("/hq"));
        assert!(needs_locale("/apiary"));
        assert!(!needs_locale("/en/docs"));
        assert!(needs_locale("/de/docs"));
        assert!(!needs_locale("/fr"));
        assert!(!needs_locale("/favicon.ico"));
        assert!(!needs_locale("/api/navigation"));
        assert!(!needs_locale("/api"));
        assert!(!needs_locale("/assets/app"));
        assert!(!needs_locale("/_next/static/chunk"));
        assert!(!needs_locale("/.well-known/security.txt"));
    }

    #[test]
    fn test_preferred_locale_cookie_wins() {
        let map = headers(&[
            (header::COOKIE, "theme=dark; lang=fr"),
            (header::ACCEPT_LANGUAGE, "en-US,en;q=0.9"),
        ]);

        assert_eq!(preferred_locale(&map, Locale::En), Locale::Fr);
    }

    #[test]
    fn test_preferred_locale_ignores_unsupported_cookie() {
        let map = headers(&[
            (header::COOKIE, "lang=de"),
            (header::ACCEPT_LANGUAGE, "fr-FR"),
        ]);

        assert_eq!(preferred_locale(&map, Locale::En), Locale::Fr);
    }

    #[test]
    fn test_preferred_locale_accept_language() {
        let map = headers(&[(header::ACCEPT_LANGUAGE, "de-DE, fr;q=0.5, en;q=0.9")]);

        assert_eq!(preferred_locale(&map, Locale::En), Locale::Fr);
    }

    #[test]
    fn test_preferred_locale_default() {
        let map = headers(&[(header::ACCEPT_LANGUAGE, "ja")]);

        assert_eq!(preferred_locale(&map, Locale::Fr), Locale::Fr);
        assert_eq!(preferred_locale(&HeaderMap::new(), Locale::En), Locale::En);
    }
}
