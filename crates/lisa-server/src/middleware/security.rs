//! Security headers middleware.
//!
//! Adds security headers to all responses:
//! - Content-Security-Policy
//! - Referrer-Policy
//! - Permissions-Policy
//! - Strict-Transport-Security
//! - X-Content-Type-Options
//! - X-Frame-Options

use axum::http::HeaderValue;
use axum::http::header::HeaderName;
use tower_http::set_header::SetResponseHeaderLayer;

/// Content-Security-Policy header value.
const CSP: &str = "default-src 'self'; \
                   script-src 'self' 'unsafe-inline' https://www.googletagmanager.com https://www.google-analytics.com; \
                   style-src 'self' 'unsafe-inline'; \
                   img-src 'self' data: https://www.googletagmanager.com https://www.google-analytics.com; \
                   font-src 'self' data:; \
                   connect-src 'self' https://hey-lisa.com https://www.google-analytics.com https://analytics.google.com https://www.googletagmanager.com; \
                   frame-ancestors 'none'; \
                   base-uri 'self'; \
                   form-action 'self'; \
                   object-src 'none'";

/// Strict-Transport-Security header value (180 days).
const HSTS: &str = "max-age=15552000; includeSubDomains";

/// Permissions-Policy header value.
const PERMISSIONS_POLICY: &str = "camera=(), microphone=(), geolocation=()";

fn overriding(name: &'static str, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static(name),
        HeaderValue::from_static(value),
    )
}

/// Create layer that adds Content-Security-Policy header.
pub(crate) fn csp_layer() -> SetResponseHeaderLayer<HeaderValue> {
    overriding("content-security-policy", CSP)
}

/// Create layer that adds Referrer-Policy header.
pub(crate) fn referrer_policy_layer() -> SetResponseHeaderLayer<HeaderValue> {
    overriding("referrer-policy", "strict-origin-when-cross-origin")
}

/// Create layer that adds Permissions-Policy header.
pub(crate) fn permissions_policy_layer() -> SetResponseHeaderLayer<HeaderValue> {
    overriding("permissions-policy", PERMISSIONS_POLICY)
}

/// Create layer that adds Strict-Transport-Security header.
pub(crate) fn hsts_layer() -> SetResponseHeaderLayer<HeaderValue> {
    overriding("strict-transport-security", HSTS)
}

/// Create layer that adds X-Content-Type-Options header.
pub(crate) fn content_type_options_layer() -> SetResponseHeaderLayer<HeaderValue> {
    overriding("x-content-type-options", "nosniff")
}

/// Create layer that adds X-Frame-Options header.
pub(crate) fn frame_options_layer() -> SetResponseHeaderLayer<HeaderValue> {
    overriding("x-frame-options", "DENY")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csp_value() {
        assert!(CSP.contains("default-src 'self'"));
        assert!(CSP.contains("connect-src 'self' https://hey-lisa.com"));
        assert!(CSP.contains("frame-ancestors 'none'"));
        assert!(CSP.contains("object-src 'none'"));
        assert!(!CSP.contains("unsafe-eval"));
    }

    #[test]
    fn test_header_values_are_valid() {
        for value in [CSP, HSTS, PERMISSIONS_POLICY] {
            assert!(HeaderValue::from_str(value).is_ok(), "{value}");
        }
    }
}
