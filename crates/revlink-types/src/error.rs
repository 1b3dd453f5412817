//! Input validation errors.

use thiserror::Error;

/// Rejected client input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Identifier does not match the allowed shape.
    #[error("invalid repository identifier: {0:?}")]
    Identifier(String),

    /// Revision text is empty, too long or contains disallowed characters.
    #[error("invalid revision reference: {0:?}")]
    Revision(String),

    /// Path cannot be normalized.
    #[error("invalid repository path: {0:?}")]
    Path(String),
}
