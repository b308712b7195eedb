//! Application state.
//!
//! Shared state for all request handlers. Built once at startup and never
//! mutated afterwards.

use std::collections::BTreeMap;
use std::path::PathBuf;

use lisa_content::ContentStore;
use lisa_site::{Dictionaries, Locale, RouteTable};

use crate::error::ServerError;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Documentation route table.
    pub(crate) routes: RouteTable,
    /// Translation tables per locale.
    pub(crate) dictionaries: Dictionaries,
    /// Content files.
    pub(crate) content: ContentStore,
    /// Public base URL without trailing slash.
    pub(crate) base_url: String,
    /// Site name for titles and structured data.
    pub(crate) site_name: String,
    /// Locale used when a request carries no preference.
    pub(crate) default_locale: Locale,
    /// Lab subscription endpoint.
    pub(crate) subscribe_url: String,
    /// Static frontend directory.
    pub(crate) public_dir: Option<PathBuf>,
    /// Application version for cache invalidation.
    pub(crate) version: String,
}

impl AppState {
    /// Parse a locale path parameter.
    pub(crate) fn locale(code: &str) -> Result<Locale, ServerError> {
        Locale::from_code(code).ok_or_else(|| ServerError::UnsupportedLocale(code.to_owned()))
    }

    /// Absolute public URL of a site path.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Absolute URLs of a locale-less path in every locale, plus `x-default`.
    pub(crate) fn alternates(&self, path: &str) -> BTreeMap<String, String> {
        let mut map: BTreeMap<String, String> = Locale::ALL
            .iter()
            .map(|locale| (locale.code().to_owned(), self.url(&format!("/{locale}{path}"))))
            .collect();
        map.insert(
            "x-default".to_owned(),
            self.url(&format!("/{}{path}", self.default_locale)),
        );
        map
    }
}
