//! Supported locales and locale-prefixed paths.
//!
//! Every public page lives under a two-letter locale prefix
//! (`/en/docs/...`, `/fr/hq/...`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A supported site locale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English (default).
    #[default]
    En,
    /// French.
    Fr,
}

/// Error returned when parsing an unsupported locale code.
#[derive(Debug, thiserror::Error)]
#[error("Unsupported locale: {0}")]
pub struct LocaleError(pub String);

impl Locale {
    /// All supported locales, in display order.
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Fr];

    /// Two-letter code used in URLs and dictionary filenames.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }

    /// `OpenGraph` locale tag.
    #[must_use]
    pub fn og_locale(self) -> &'static str {
        match self {
            Self::En => "en_US",
            Self::Fr => "fr_FR",
        }
    }

    /// Native display name for the language selector.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Fr => "Français",
        }
    }

    /// Look up a locale by its code (case-insensitive).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|locale| locale.code().eq_ignore_ascii_case(code))
    }

    /// Pick the first supported language from an `Accept-Language` header.
    ///
    /// Languages are taken in header order; entries with `q=0` are skipped.
    #[must_use]
    pub fn negotiate(accept_language: &str) -> Option<Self> {
        accept_language.split(',').find_map(|entry| {
            let mut parts = entry.split(';').map(str::trim);
            let tag = parts.next()?;
            let refused = parts.any(|param| {
                param
                    .strip_prefix("q=")
                    .and_then(|q| q.parse::<f32>().ok())
                    .is_some_and(|q| q <= 0.0)
            });
            if refused {
                return None;
            }
            let primary = tag.split('-').next()?;
            Self::from_code(primary)
        })
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| LocaleError(s.to_owned()))
    }
}

/// Check whether a request path starts with a supported locale segment.
///
/// The match is exact, so `/EN/docs` and `/hq` are not localized.
#[must_use]
pub fn path_has_locale(path: &str) -> bool {
    let first = path.trim_start_matches('/').split('/').next().unwrap_or("");
    Locale::ALL.iter().any(|locale| locale.code() == first)
}

/// Prefix a site path with a locale (`/docs` becomes `/en/docs`).
#[must_use]
pub fn localized_path(locale: Locale, path: &str) -> String {
    match path {
        "" | "/" => format!("/{locale}"),
        _ if path.starts_with('/') => format!("/{locale}{path}"),
        _ => format!("/{locale}/{path}"),
    }
}

/// Replace the locale prefix of a path, as the language selector does.
///
/// Paths without a locale prefix get one.
#[must_use]
pub fn switch_locale(path: &str, locale: Locale) -> String {
    if !path_has_locale(path) {
        return localized_path(locale, path);
    }
    let rest = path.trim_start_matches('/');
    let rest = rest.get(2..).unwrap_or("");
    format!("/{locale}{rest}")
}
