//! Environment variable expansion for configuration strings.

use std::borrow::Cow;

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a config value.
///
/// `field` names the config key for error reporting.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_literal() {
        assert_eq!(expand_env("plain", "f").unwrap(), "plain");
    }

    #[test]
    fn test_expand_default_value() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("LISA_EXPAND_UNSET");
        }

        assert_eq!(
            expand_env("${LISA_EXPAND_UNSET:-fallback}", "f").unwrap(),
            "fallback"
        );
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("LISA_EXPAND_MISSING");
        }

        let err = expand_env("${LISA_EXPAND_MISSING}", "site.base_url").unwrap_err();

        assert!(err.to_string().contains("site.base_url"));
        assert!(err.to_string().contains("LISA_EXPAND_MISSING"));
    }
}
