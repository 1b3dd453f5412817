//! Registry error types.

use thiserror::Error;

/// Registry-related errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Registry database file does not exist.
    #[error("registry database not found: {0}")]
    DatabaseNotFound(std::path::PathBuf),

    /// Query or connection failure reported by SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The query failed again after reconnecting.
    #[error("project registry unavailable")]
    Unavailable(#[source] Box<RegistryError>),
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::path::PathBuf;

    #[test]
    fn test_database_not_found_display() {
        let err = RegistryError::DatabaseNotFound(PathBuf::from("/var/lib/registry.sqlite"));
        assert_eq!(
            err.to_string(),
            "registry database not found: /var/lib/registry.sqlite"
        );
    }

    #[test]
    fn test_unavailable_keeps_source() {
        let inner = RegistryError::DatabaseNotFound(PathBuf::from("/db"));
        let err = RegistryError::Unavailable(Box::new(inner));
        assert_eq!(err.to_string(), "project registry unavailable");
        assert!(err.source().is_some());
    }
}
