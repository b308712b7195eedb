//! Configuration management for LiSA Docs.
//!
//! Parses `lisa.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `site.base_url`
//! - `lab.subscribe_url`

mod expand;

use std::path::{Path, PathBuf};

use lisa_site::Locale;
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override content root directory.
    pub contents_dir: Option<PathBuf>,
    /// Override public base URL.
    pub base_url: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "lisa.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Public site identity.
    pub site: SiteConfig,
    /// Content configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Lab email capture configuration.
    pub lab: LabConfig,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
        }
    }
}

/// Public site identity used for canonical URLs, sitemap and structured data.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Public base URL without trailing slash.
    pub base_url: String,
    /// Site name.
    pub name: String,
    /// Locale used when a request carries no usable preference.
    pub default_locale: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://hey-lisa.com".to_owned(),
            name: "Hey LiSA".to_owned(),
            default_locale: Locale::default().code().to_owned(),
        }
    }
}

impl SiteConfig {
    /// Parsed default locale (the built-in default if unsupported).
    #[must_use]
    pub fn default_locale(&self) -> Locale {
        Locale::from_code(&self.default_locale).unwrap_or_default()
    }
}

/// Raw content configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    contents_dir: Option<String>,
    dictionaries_dir: Option<String>,
    routes_file: Option<String>,
    public_dir: Option<String>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Root of `docs/{lang}/...` and `hq/{lang}/...` content trees.
    pub contents_dir: PathBuf,
    /// Directory with `{lang}.json` dictionary overrides.
    pub dictionaries_dir: Option<PathBuf>,
    /// YAML routes file replacing the built-in route tree.
    pub routes_file: Option<PathBuf>,
    /// Directory of static frontend assets.
    pub public_dir: Option<PathBuf>,
}

/// Lab email capture configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// Endpoint receiving `{"email": ...}` subscriptions.
    pub subscribe_url: String,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            subscribe_url: "https://hey-lisa.com/api/subscribe".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.base_url`").
        field: String,
        /// Error message (e.g., "${`LISA_BASE_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `lisa.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(contents_dir) = &settings.contents_dir {
            self.content_resolved.contents_dir.clone_from(contents_dir);
        }
        if let Some(base_url) = &settings.base_url {
            self.site.base_url = base_url.trim_end_matches('/').to_owned();
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            site: SiteConfig::default(),
            content: ContentConfigRaw::default(),
            lab: LabConfig::default(),
            content_resolved: ContentConfig {
                contents_dir: base.join("contents"),
                dictionaries_dir: None,
                routes_file: None,
                public_dir: None,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_site()?;
        require_non_empty(&self.lab.subscribe_url, "lab.subscribe_url")?;
        require_http_url(&self.lab.subscribe_url, "lab.subscribe_url")?;
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 lets the OS pick a port, which is never what a config file means
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate site identity.
    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.base_url, "site.base_url")?;
        require_http_url(&self.site.base_url, "site.base_url")?;
        require_non_empty(&self.site.name, "site.name")?;

        if Locale::from_code(&self.site.default_locale).is_none() {
            let supported: Vec<&str> = Locale::ALL.iter().map(|l| l.code()).collect();
            return Err(ConfigError::Validation(format!(
                "site.default_locale must be one of: {}",
                supported.join(", ")
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        self.site.base_url = expand::expand_env(&self.site.base_url, "site.base_url")?;
        self.lab.subscribe_url = expand::expand_env(&self.lab.subscribe_url, "lab.subscribe_url")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let optional = |path: Option<&String>| path.map(|p| config_dir.join(p));

        self.content_resolved = ContentConfig {
            contents_dir: config_dir.join(self.content.contents_dir.as_deref().unwrap_or("contents")),
            dictionaries_dir: optional(self.content.dictionaries_dir.as_ref()),
            routes_file: optional(self.content.routes_file.as_ref()),
            public_dir: optional(self.content.public_dir.as_ref()),
        };

        let trimmed = self.site.base_url.trim_end_matches('/').len();
        self.site.base_url.truncate(trimmed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7979);
        assert_eq!(config.site.base_url, "https://hey-lisa.com");
        assert_eq!(config.site.default_locale(), Locale::En);
        assert_eq!(
            config.content_resolved.contents_dir,
            PathBuf::from("/test/contents")
        );
        assert!(config.content_resolved.public_dir.is_none());
        assert_eq!(config.lab.subscribe_url, "https://hey-lisa.com/api/subscribe");
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7979);
        assert_eq!(config.site.name, "Hey LiSA");
    }

    #[test]
    fn test_parse_site_config() {
        let toml = r#"
[site]
base_url = "https://docs.example.com/"
name = "Example"
default_locale = "fr"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.site.base_url, "https://docs.example.com");
        assert_eq!(config.site.name, "Example");
        assert_eq!(config.site.default_locale(), Locale::Fr);
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[content]
contents_dir = "site/contents"
dictionaries_dir = "i18n"
routes_file = "routes.yaml"
public_dir = "dist"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.content_resolved.contents_dir,
            PathBuf::from("/project/site/contents")
        );
        assert_eq!(
            config.content_resolved.dictionaries_dir,
            Some(PathBuf::from("/project/i18n"))
        );
        assert_eq!(
            config.content_resolved.routes_file,
            Some(PathBuf::from("/project/routes.yaml"))
        );
        assert_eq!(
            config.content_resolved.public_dir,
            Some(PathBuf::from("/project/dist"))
        );
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lisa.toml");
        std::fs::write(&path, "[server]\nport = 9000\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.config_path, Some(path));
        assert_eq!(
            config.content_resolved.contents_dir,
            dir.path().join("contents")
        );
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/lisa.toml")), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_file_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lisa.toml");
        std::fs::write(&path, "[site]\ndefault_locale = \"de\"\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("default_locale"));
    }

    #[test]
    fn test_apply_cli_settings_host() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            host: Some("0.0.0.0".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 7979); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_contents_dir_and_base_url() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            contents_dir: Some(PathBuf::from("/custom/contents")),
            base_url: Some("http://localhost:7979/".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.content_resolved.contents_dir,
            PathBuf::from("/custom/contents")
        );
        assert_eq!(config.site.base_url, "http://localhost:7979");
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7979);
    }

    #[test]
    fn test_expand_env_vars_site() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("LISA_TEST_BASE_URL", "https://staging.hey-lisa.com");
        }

        let toml = r#"
[site]
base_url = "${LISA_TEST_BASE_URL}"

[lab]
subscribe_url = "${LISA_TEST_SUBSCRIBE:-https://example.com/subscribe}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.site.base_url, "https://staging.hey-lisa.com");
        assert_eq!(config.lab.subscribe_url, "https://example.com/subscribe");

        unsafe {
            std::env::remove_var("LISA_TEST_BASE_URL");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MISSING_VAR_LISA_CONFIG_TEST");
        }

        let toml = r#"
[server]
host = "${MISSING_VAR_LISA_CONFIG_TEST}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("server.host"));
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_server_host_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.host = String::new();
        assert_validation_error(&config, &["server.host", "empty"]);
    }

    #[test]
    fn test_validate_server_port_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.port = 0;
        assert_validation_error(&config, &["server.port"]);
    }

    #[test]
    fn test_validate_base_url_scheme() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.base_url = "hey-lisa.com".to_owned();
        assert_validation_error(&config, &["site.base_url", "http"]);
    }

    #[test]
    fn test_validate_subscribe_url_scheme() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.lab.subscribe_url = "ftp://example.com".to_owned();
        assert_validation_error(&config, &["lab.subscribe_url", "http"]);
    }

    #[test]
    fn test_validate_default_locale_unsupported() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.default_locale = "de".to_owned();
        assert_validation_error(&config, &["default_locale", "en, fr"]);
    }
}
