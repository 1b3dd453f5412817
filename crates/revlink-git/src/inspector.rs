//! Revision lookup and mirror refresh below a repositories root.

use std::path::PathBuf;

use revlink_types::{CanonicalPath, CanonicalRevision, FULL_HASH_LEN, RevisionReference};
use tracing::{debug, info};

use crate::{GitError, GitResult, Repository};

/// Inspects the mirrored repositories stored under one root directory.
#[derive(Debug, Clone)]
pub struct GitInspector {
    repositories_root: PathBuf,
}

impl GitInspector {
    /// Creates an inspector for repositories under `repositories_root`.
    #[must_use]
    pub fn new(repositories_root: impl Into<PathBuf>) -> Self {
        Self {
            repositories_root: repositories_root.into(),
        }
    }

    /// Confirms `reference` names a commit in the repository at `path` and
    /// returns its full hash.
    ///
    /// Every failure (unopenable repository, unknown or ambiguous revision) is
    /// reported as `None`.
    pub fn resolve_revision(
        &self,
        path: &CanonicalPath,
        reference: &RevisionReference,
    ) -> Option<CanonicalRevision> {
        if reference.as_str().len() > FULL_HASH_LEN {
            return None;
        }

        let location = path.under(&self.repositories_root);
        let result = Repository::open(&location).and_then(|repo| repo.resolve_commit(reference));

        match result {
            Ok(revision) => {
                debug!(%path, %reference, %revision, "resolved revision");
                Some(revision)
            }
            Err(e) => {
                debug!(%path, %reference, error = %e, "revision not resolved");
                None
            }
        }
    }

    /// Fetches `origin` into the mirror at `suffix` below the root.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::InvalidPath`] if `suffix` does not normalize,
    /// [`GitError::RepoNotFound`] if it is not a directory, or the fetch error.
    pub fn refresh_mirror(&self, suffix: &str) -> GitResult<()> {
        let path =
            CanonicalPath::normalize(suffix).map_err(|_| GitError::InvalidPath(suffix.to_string()))?;
        let location = path.under(&self.repositories_root);

        if !location.is_dir() {
            return Err(GitError::RepoNotFound(location));
        }

        let repo = Repository::open(&location)?;
        repo.fetch_origin()?;
        info!(%path, bare = repo.is_bare(), "refreshed mirror from origin");

        Ok(())
    }
}
