//! CLI error types.

use lisa_config::ConfigError;
use lisa_server::StartupError;
use lisa_site::RouteError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Routes(#[from] RouteError),

    #[error("{0}")]
    Startup(#[from] StartupError),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_converts() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let message = format!("JSON output failed: {source}");

        let err = CliError::from(source);

        assert!(matches!(err, CliError::Json(_)));
        assert_eq!(err.to_string(), message);
    }
}
