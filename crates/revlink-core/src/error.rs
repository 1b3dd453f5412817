//! Core error types.

use thiserror::Error;

/// Core-related errors.
///
/// Resolution itself never fails; these only arise while wiring the resolver
/// and its collaborators together.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] revlink_config::ConfigError),

    /// A configured base URL cannot have paths appended to it.
    #[error("{field} is not a usable base URL: {reason}")]
    InvalidUrl { field: &'static str, reason: String },

    /// A configured directory does not exist.
    #[error("{what} is not a directory: {path}")]
    MissingDirectory {
        what: &'static str,
        path: std::path::PathBuf,
    },
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_directory_display() {
        let err = CoreError::MissingDirectory {
            what: "repositories root",
            path: PathBuf::from("/repositories"),
        };
        assert_eq!(
            err.to_string(),
            "repositories root is not a directory: /repositories"
        );
    }

    #[test]
    fn test_invalid_url_display() {
        let err = CoreError::InvalidUrl {
            field: "urls.browser",
            reason: "relative URL without a base".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "urls.browser is not a usable base URL: relative URL without a base"
        );
    }

    #[test]
    fn test_config_error_from() {
        let err = CoreError::from(revlink_config::ConfigError::Invalid("bad".to_string()));
        assert_eq!(err.to_string(), "config error: invalid configuration: bad");
    }
}
