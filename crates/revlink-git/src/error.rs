//! Git error types.

use thiserror::Error;

/// Git-related errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found.
    #[error("repository not found at {0}")]
    RepoNotFound(std::path::PathBuf),

    /// Not a git repository.
    #[error("not a git repository: {0}")]
    NotARepo(std::path::PathBuf),

    /// Revision does not name a commit.
    #[error("revision not found: {0}")]
    RevisionNotFound(String),

    /// Abbreviated revision matches more than one object.
    #[error("ambiguous revision: {0}")]
    AmbiguousRevision(String),

    /// Repository has no such remote.
    #[error("remote not found: {0}")]
    RemoteNotFound(String),

    /// Path is not acceptable below the repositories root.
    #[error("invalid repository path: {0}")]
    InvalidPath(String),

    /// Git2 error.
    #[error("git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Result type for git operations.
pub type GitResult<T> = Result<T, GitError>;
