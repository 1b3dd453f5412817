//! Git repository wrapper.

use std::path::Path;

use git2::{ErrorCode, Repository as Git2Repo};
use revlink_types::{CanonicalRevision, RevisionReference};

use crate::{GitError, GitResult};

/// Name of the remote a mirror is refreshed from.
const ORIGIN: &str = "origin";

/// A Git repository wrapper.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Opens a repository at the given path.
    ///
    /// Works for both bare mirrors and repositories with a working tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not exist or is not a Git repository.
    pub fn open(path: impl AsRef<Path>) -> GitResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GitError::RepoNotFound(path.to_path_buf()));
        }
        let inner = Git2Repo::open(path).map_err(|_| GitError::NotARepo(path.to_path_buf()))?;
        Ok(Self { inner })
    }

    /// Returns whether the repository is bare.
    #[must_use]
    pub fn is_bare(&self) -> bool {
        self.inner.is_bare()
    }

    /// Resolves a possibly abbreviated commit hash to its full form.
    ///
    /// Only commit hashes are accepted: branch and tag names are not looked up.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::AmbiguousRevision`] if the prefix matches several
    /// objects and [`GitError::RevisionNotFound`] if it names no commit.
    pub fn resolve_commit(&self, reference: &RevisionReference) -> GitResult<CanonicalRevision> {
        let text = reference.as_str().to_ascii_lowercase();
        let commit = self
            .inner
            .find_commit_by_prefix(&text)
            .map_err(|e| match e.code() {
                ErrorCode::Ambiguous => GitError::AmbiguousRevision(text.clone()),
                ErrorCode::NotFound | ErrorCode::InvalidSpec => {
                    GitError::RevisionNotFound(text.clone())
                }
                _ => GitError::Git2(e),
            })?;

        CanonicalRevision::new(&commit.id().to_string())
            .map_err(|_| GitError::RevisionNotFound(text))
    }

    /// Fetches from the `origin` remote using its configured refspecs.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no `origin` remote or the fetch fails.
    pub fn fetch_origin(&self) -> GitResult<()> {
        let mut remote = self
            .inner
            .find_remote(ORIGIN)
            .map_err(|_| GitError::RemoteNotFound(ORIGIN.to_string()))?;

        remote.fetch(&[] as &[&str], None, None)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Repository as Git2Repository, Signature};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, Repository) {
        let temp_dir = TempDir::new().unwrap();
        let git2_repo = Git2Repository::init(temp_dir.path()).unwrap();

        // Configure user for commits
        let mut config = git2_repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();

        let repo = Repository { inner: git2_repo };
        (temp_dir, repo)
    }

    fn create_commit(repo: &Repository, message: &str) -> git2::Oid {
        let sig = Signature::now("Test User", "test@example.com").unwrap();
        let tree_id = {
            let mut index = repo.inner.index().unwrap();
            index.write_tree().unwrap()
        };
        let tree = repo.inner.find_tree(tree_id).unwrap();

        let parent = repo.inner.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        repo.inner
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    fn reference(text: &str) -> RevisionReference {
        RevisionReference::parse(text).unwrap()
    }

    #[test]
    fn test_open_valid_repo() {
        let (temp_dir, _repo) = create_test_repo();
        let result = Repository::open(temp_dir.path());
        assert!(result.is_ok());
    }

    #[test]
    fn test_open_invalid_path() {
        let result = Repository::open("/nonexistent/path/to/repo");
        assert!(matches!(result, Err(GitError::RepoNotFound(_))));
    }

    #[test]
    fn test_open_not_a_repo() {
        let temp_dir = TempDir::new().unwrap();
        let result = Repository::open(temp_dir.path());
        assert!(matches!(result, Err(GitError::NotARepo(_))));
    }

    #[test]
    fn test_open_bare() {
        let temp_dir = TempDir::new().unwrap();
        Git2Repository::init_bare(temp_dir.path()).unwrap();

        let repo = Repository::open(temp_dir.path()).unwrap();
        assert!(repo.is_bare());
    }

    #[test]
    fn test_resolve_full_hash() {
        let (_temp_dir, repo) = create_test_repo();
        let oid = create_commit(&repo, "Initial commit");

        let resolved = repo.resolve_commit(&reference(&oid.to_string())).unwrap();
        assert_eq!(resolved.as_str(), oid.to_string());
    }

    #[test]
    fn test_resolve_short_hash() {
        let (_temp_dir, repo) = create_test_repo();
        create_commit(&repo, "First commit");
        let oid = create_commit(&repo, "Second commit");
        let full = oid.to_string();

        let resolved = repo.resolve_commit(&reference(&full[..10])).unwrap();
        assert_eq!(resolved.as_str(), full);
    }

    #[test]
    fn test_resolve_uppercase_hash() {
        let (_temp_dir, repo) = create_test_repo();
        let oid = create_commit(&repo, "Initial commit");
        let full = oid.to_string();

        let resolved = repo
            .resolve_commit(&reference(&full[..12].to_ascii_uppercase()))
            .unwrap();
        assert_eq!(resolved.as_str(), full);
    }

    #[test]
    fn test_resolve_unknown_hash() {
        let (_temp_dir, repo) = create_test_repo();
        create_commit(&repo, "Initial commit");

        let result = repo.resolve_commit(&reference(&"0".repeat(40)));
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_does_not_accept_branch_names() {
        let (_temp_dir, repo) = create_test_repo();
        create_commit(&repo, "Initial commit");
        let head = repo.inner.head().unwrap();
        let branch = head.shorthand().unwrap().to_string();

        let result = repo.resolve_commit(&reference(&branch));
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_empty_repo() {
        let (_temp_dir, repo) = create_test_repo();
        let result = repo.resolve_commit(&reference("abcdef12"));
        assert!(result.is_err());
    }

    #[test]
    fn test_fetch_origin_without_remote() {
        let (_temp_dir, repo) = create_test_repo();
        let result = repo.fetch_origin();
        assert!(matches!(result, Err(GitError::RemoteNotFound(_))));
    }

    #[test]
    fn test_fetch_origin_brings_new_commits() {
        let (origin_dir, origin) = create_test_repo();
        create_commit(&origin, "First commit");

        let mirror_dir = TempDir::new().unwrap();
        let mirror_path = mirror_dir.path().join("mirror.git");
        git2::build::RepoBuilder::new()
            .bare(true)
            .clone(origin_dir.path().to_str().unwrap(), &mirror_path)
            .unwrap();

        let new_oid = create_commit(&origin, "Second commit");
        let mirror = Repository::open(&mirror_path).unwrap();
        assert!(mirror.inner.find_commit(new_oid).is_err());

        mirror.fetch_origin().unwrap();
        assert!(mirror.inner.find_commit(new_oid).is_ok());
    }
}
