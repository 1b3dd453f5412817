//! Collaborators consulted by the resolver.

use revlink_git::GitInspector;
use revlink_registry::{RegistryResult, SqliteRegistry};
use revlink_types::{
    CanonicalPath, CanonicalRevision, ProjectId, ProjectMatch, RepositoryIdentifier,
    RevisionReference,
};

/// Maps repository identifiers to canonical paths.
pub trait IdentifierStore: Send + Sync {
    /// Returns the path for `identifier`, or `None` if the identifier is
    /// unknown or its repository is missing.
    fn resolve_path(&self, identifier: &RepositoryIdentifier) -> Option<CanonicalPath>;
}

/// Confirms revisions exist in a repository.
pub trait RepositoryInspector: Send + Sync {
    /// Returns the full hash for `reference` in the repository at `path`, or
    /// `None` if it does not name exactly one commit there.
    fn resolve_revision(
        &self,
        path: &CanonicalPath,
        reference: &RevisionReference,
    ) -> Option<CanonicalRevision>;
}

/// Read access to the hierarchical project registry.
pub trait ProjectRegistry: Send + Sync {
    /// Finds the project whose registered repository is `path` and which has a
    /// changeset for `revision`.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be queried.
    fn find_owning_project(
        &self,
        path: &CanonicalPath,
        revision: &CanonicalRevision,
    ) -> RegistryResult<Option<ProjectMatch>>;

    /// Returns slugs from the root project down to `project`.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be queried.
    fn ancestry_chain(&self, project: ProjectId) -> RegistryResult<Vec<String>>;
}

impl RepositoryInspector for GitInspector {
    fn resolve_revision(
        &self,
        path: &CanonicalPath,
        reference: &RevisionReference,
    ) -> Option<CanonicalRevision> {
        GitInspector::resolve_revision(self, path, reference)
    }
}

impl ProjectRegistry for SqliteRegistry {
    fn find_owning_project(
        &self,
        path: &CanonicalPath,
        revision: &CanonicalRevision,
    ) -> RegistryResult<Option<ProjectMatch>> {
        SqliteRegistry::find_owning_project(self, path, revision)
    }

    fn ancestry_chain(&self, project: ProjectId) -> RegistryResult<Vec<String>> {
        SqliteRegistry::ancestry_chain(self, project)
    }
}
