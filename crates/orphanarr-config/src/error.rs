//! Error types for configuration loading.

use thiserror::Error;

/// Primary error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable was unset or blank.
    #[error("missing required environment variable")]
    MissingEnv {
        /// Variable name.
        name: &'static str,
    },
    /// Field contained an invalid value.
    #[error("invalid configuration field")]
    InvalidField {
        /// Variable that failed validation.
        field: &'static str,
        /// Offending value when available.
        value: Option<String>,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, value: &str, reason: &'static str) -> Self {
        Self::InvalidField {
            field,
            value: Some(value.to_string()),
            reason,
        }
    }
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_variants_render_constant_messages() {
        let missing = ConfigError::MissingEnv {
            name: "QBITTORRENT_BASE_URL",
        };
        assert_eq!(missing.to_string(), "missing required environment variable");

        let invalid = ConfigError::invalid("ORPHANARR_HTTP_TIMEOUT_SECS", "abc", "not_a_number");
        assert_eq!(invalid.to_string(), "invalid configuration field");
        assert!(matches!(
            invalid,
            ConfigError::InvalidField {
                field: "ORPHANARR_HTTP_TIMEOUT_SECS",
                value: Some(ref value),
                reason: "not_a_number",
            } if value == "abc"
        ));
    }
}
