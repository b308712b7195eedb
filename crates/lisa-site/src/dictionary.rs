//! Per-locale translation tables.
//!
//! Dictionaries are JSON documents with nested sections (`leftbar`,
//! `navbar.links`, `docs`, `metadata`, ...). Built-in dictionaries are
//! embedded in the binary; a directory of `{code}.json` files can replace
//! them per locale.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::breadcrumb::humanize_key;
use crate::locale::Locale;

const BUILTIN_EN: &str = include_str!("../dictionaries/en.json");
const BUILTIN_FR: &str = include_str!("../dictionaries/fr.json");

/// Error type for dictionary loading.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    /// I/O error reading a dictionary file.
    #[error("Failed to read dictionary {}: {source}", path.display())]
    Io {
        /// Dictionary file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Dictionary is not valid JSON.
    #[error("Invalid dictionary JSON ({name}): {message}")]
    Parse {
        /// Dictionary name (locale code or file path).
        name: String,
        /// Parser message.
        message: String,
    },
}

/// A translation table for one locale.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dictionary {
    root: Value,
}

impl Dictionary {
    /// Wrap an already parsed JSON value.
    #[must_use]
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Parse a dictionary from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `DictionaryError::Parse` if the text is not a JSON object.
    pub fn from_json(name: &str, content: &str) -> Result<Self, DictionaryError> {
        let root: Value = serde_json::from_str(content).map_err(|e| DictionaryError::Parse {
            name: name.to_owned(),
            message: e.to_string(),
        })?;
        if !root.is_object() {
            return Err(DictionaryError::Parse {
                name: name.to_owned(),
                message: "top level must be an object".to_owned(),
            });
        }
        Ok(Self { root })
    }

    /// Look up a non-empty string by dotted key (e.g., `"navbar.links.docs"`).
    #[must_use]
    pub fn get(&self, dotted_key: &str) -> Option<&str> {
        dotted_key
            .split('.')
            .try_fold(&self.root, |value, key| value.get(key))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Look up a sidebar label by machine key.
    #[must_use]
    pub fn leftbar(&self, key: &str) -> Option<&str> {
        self.root
            .get("leftbar")
            .and_then(|section| section.get(key))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Localized page title for a route key, humanizing the key on a miss.
    #[must_use]
    pub fn page_title(&self, key: &str) -> String {
        self.leftbar(key)
            .map_or_else(|| humanize_key(key), str::to_owned)
    }

    /// Label of the documentation root (breadcrumb root entry).
    #[must_use]
    pub fn docs_label(&self) -> &str {
        self.get("navbar.links.docs").unwrap_or("Docs")
    }

    /// The raw JSON document (served to the frontend).
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.root
    }
}

/// Dictionaries for every supported locale.
#[derive(Clone, Debug)]
pub struct Dictionaries {
    by_locale: HashMap<Locale, Dictionary>,
    fallback: Dictionary,
}

impl Dictionaries {
    /// Load the embedded dictionaries.
    ///
    /// # Errors
    ///
    /// Returns `DictionaryError::Parse` if an embedded dictionary is malformed.
    pub fn builtin() -> Result<Self, DictionaryError> {
        let mut by_locale = HashMap::new();
        for (locale, content) in [(Locale::En, BUILTIN_EN), (Locale::Fr, BUILTIN_FR)] {
            by_locale.insert(locale, Dictionary::from_json(locale.code(), content)?);
        }
        Ok(Self::from_map(by_locale))
    }

    /// Build from explicit dictionaries. Locales without an entry use the
    /// default locale's dictionary (or an empty one).
    #[must_use]
    pub fn from_map(by_locale: HashMap<Locale, Dictionary>) -> Self {
        let fallback = by_locale
            .get(&Locale::default())
            .cloned()
            .unwrap_or_default();
        Self {
            by_locale,
            fallback,
        }
    }

    /// Replace built-in dictionaries with `{code}.json` files from `dir`.
    ///
    /// Missing files keep the current dictionary.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn with_overrides(mut self, dir: &Path) -> Result<Self, DictionaryError> {
        for locale in Locale::ALL {
            let path = dir.join(format!("{}.json", locale.code()));
            if !path.is_file() {
                continue;
            }
            let content = std::fs::read_to_string(&path).map_err(|source| DictionaryError::Io {
                path: path.clone(),
                source,
            })?;
            let dictionary = Dictionary::from_json(&path.display().to_string(), &content)?;
            tracing::debug!(locale = %locale, path = %path.display(), "Loaded dictionary override");
            self.by_locale.insert(locale, dictionary);
        }
        if let Some(default) = self.by_locale.get(&Locale::default()) {
            self.fallback = default.clone();
        }
        Ok(self)
    }

    /// Get the dictionary for a locale.
    #[must_use]
    pub fn get(&self, locale: Locale) -> &Dictionary {
        self.by_locale.get(&locale).unwrap_or(&self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::docs_routes;
    use crate::route_table::RouteTable;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_dictionaries_parse() {
        let dicts = Dictionaries::builtin().unwrap();

        assert_eq!(dicts.get(Locale::En).docs_label(), "Docs");
        assert_eq!(dicts.get(Locale::Fr).get("docs.next"), Some("Suivant"));
    }

    #[test]
    fn test_builtin_dictionaries_cover_every_route() {
        fn keys(nodes: &[crate::RouteNode], out: &mut Vec<String>) {
            for node in nodes {
                out.push(node.title.clone());
                keys(&node.items, out);
            }
        }

        let dicts = Dictionaries::builtin().unwrap();
        let table = RouteTable::new(docs_routes());
        let mut all = Vec::new();
        keys(table.routes(), &mut all);

        for locale in Locale::ALL {
            for key in &all {
                assert!(
                    dicts.get(locale).leftbar(key).is_some(),
                    "{locale} dictionary is missing leftbar.{key}"
                );
            }
        }
    }

    #[test]
    fn test_get_dotted_key() {
        let dict = Dictionary::from_value(serde_json::json!({
            "navbar": { "links": { "docs": "Documentation" } }
        }));

        assert_eq!(dict.get("navbar.links.docs"), Some("Documentation"));
        assert_eq!(dict.get("navbar.links.hq"), None);
        assert_eq!(dict.get("navbar.links"), None);
    }

    #[test]
    fn test_docs_label_defaults() {
        assert_eq!(Dictionary::default().docs_label(), "Docs");
    }

    #[test]
    fn test_page_title_falls_back_to_humanized_key() {
        let dict = Dictionary::from_value(serde_json::json!({ "leftbar": { "swap": "Échanger" } }));

        assert_eq!(dict.page_title("swap"), "Échanger");
        assert_eq!(dict.page_title("run_and_monitor"), "Run And Monitor");
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        let err = Dictionary::from_json("en", "[1, 2]").unwrap_err();

        assert!(matches!(err, DictionaryError::Parse { .. }));
    }

    #[test]
    fn test_from_map_missing_locale_uses_default() {
        let mut map = HashMap::new();
        map.insert(
            Locale::En,
            Dictionary::from_value(serde_json::json!({ "leftbar": { "swap": "Swap" } })),
        );
        let dicts = Dictionaries::from_map(map);

        assert_eq!(dicts.get(Locale::Fr).leftbar("swap"), Some("Swap"));
    }

    #[test]
    fn test_with_overrides_replaces_locale() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("fr.json"),
            r#"{"leftbar": {"swap": "Troc"}}"#,
        )
        .unwrap();

        let dicts = Dictionaries::builtin()
            .unwrap()
            .with_overrides(dir.path())
            .unwrap();

        assert_eq!(dicts.get(Locale::Fr).leftbar("swap"), Some("Troc"));
        assert_eq!(dicts.get(Locale::En).leftbar("swap"), Some("Swap"));
    }

    #[test]
    fn test_with_overrides_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("en.json"), "{ nope").unwrap();

        let err = Dictionaries::builtin()
            .unwrap()
            .with_overrides(dir.path())
            .unwrap_err();

        assert!(matches!(err, DictionaryError::Parse { .. }));
    }
}
