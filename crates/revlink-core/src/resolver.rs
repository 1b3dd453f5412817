//! Commit reference resolution.

use revlink_config::Config;
use revlink_git::GitInspector;
use revlink_registry::{SqliteConnector, SqliteRegistry};
use revlink_types::{CanonicalPath, CanonicalRevision, RepositoryIdentifier, RevisionReference};
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    CoreError, CoreResult, IdentifierStore, MappingDirectory, ProjectRegistry,
    RepositoryInspector, UrlBuilder,
};

/// Where a commit reference leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    /// The project tracker knows the commit.
    Tracker {
        /// Project slugs, root first.
        chain: Vec<String>,
        /// Full commit hash.
        revision: CanonicalRevision,
    },

    /// The commit exists but no registry record matches this repository.
    Browser {
        /// Repository path.
        path: CanonicalPath,
        /// Full commit hash.
        revision: CanonicalRevision,
    },

    /// Nothing resolved.
    Portal,
}

impl Resolution {
    /// Short name of the outcome, for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Tracker { .. } => "tracker",
            Self::Browser { .. } => "browser",
            Self::Portal => "portal",
        }
    }
}

/// Resolves `(identifier, revision)` pairs to redirect targets.
///
/// Stateless between calls; share it behind an `Arc`.
pub struct Resolver {
    store: Box<dyn IdentifierStore>,
    inspector: Box<dyn RepositoryInspector>,
    registry: Box<dyn ProjectRegistry>,
    urls: UrlBuilder,
}

impl Resolver {
    /// Creates a resolver over the given collaborators.
    #[must_use]
    pub fn new(
        store: Box<dyn IdentifierStore>,
        inspector: Box<dyn RepositoryInspector>,
        registry: Box<dyn ProjectRegistry>,
        urls: UrlBuilder,
    ) -> Self {
        Self {
            store,
            inspector,
            registry,
            urls,
        }
    }

    /// Wires the production collaborators from configuration.
    ///
    /// The registry database is not opened here: it may appear later, and
    /// until then every found commit resolves to the browser.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, a URL base does not
    /// parse, or the repositories root is not a directory.
    pub fn from_config(config: &Config) -> CoreResult<Self> {
        config.validate()?;

        let root = &config.storage.repositories_root;
        if !root.is_dir() {
            return Err(CoreError::MissingDirectory {
                what: "repositories root",
                path: root.clone(),
            });
        }
        if !config.storage.mappings_dir.is_dir() {
            warn!(
                dir = %config.storage.mappings_dir.display(),
                "mappings directory is missing, no identifier will resolve"
            );
        }

        let store = MappingDirectory::new(&config.storage.mappings_dir, root);
        let inspector = GitInspector::new(root);
        let registry = SqliteRegistry::new(
            SqliteConnector::new(&config.registry.database, config.registry.busy_timeout()),
            config.registry.path_prefix.clone(),
        );

        Ok(Self::new(
            Box::new(store),
            Box::new(inspector),
            Box::new(registry),
            UrlBuilder::from_config(&config.urls)?,
        ))
    }

    /// Returns the URL builder.
    #[must_use]
    pub fn urls(&self) -> &UrlBuilder {
        &self.urls
    }

    /// Decides where `identifier` and `revision_text` lead.
    ///
    /// Never fails: invalid input and every kind of lookup miss resolve to
    /// [`Resolution::Portal`], and an unreachable registry degrades to
    /// [`Resolution::Browser`].
    pub fn resolve(&self, identifier: &str, revision_text: &str) -> Resolution {
        let Some((path, revision)) = self.locate(identifier, revision_text) else {
            return Resolution::Portal;
        };

        self.tracker(&path, &revision)
            .unwrap_or_else(|| Resolution::Browser { path, revision })
    }

    /// Resolves and renders the target URL.
    pub fn resolve_url(&self, identifier: &str, revision_text: &str) -> String {
        self.urls.render(&self.resolve(identifier, revision_text))
    }

    /// Validates the input, then finds the repository and the full revision.
    fn locate(
        &self,
        identifier: &str,
        revision_text: &str,
    ) -> Option<(CanonicalPath, CanonicalRevision)> {
        let identifier = RepositoryIdentifier::parse(identifier)
            .inspect_err(|e| debug!(error = %e, "rejected identifier"))
            .ok()?;
        let reference = RevisionReference::parse(revision_text)
            .inspect_err(|e| debug!(error = %e, "rejected revision"))
            .ok()?;

        let path = self.store.resolve_path(&identifier)?;
        let revision = self.inspector.resolve_revision(&path, &reference)?;

        Some((path, revision))
    }

    /// Looks the revision up in the project registry.
    fn tracker(&self, path: &CanonicalPath, revision: &CanonicalRevision) -> Option<Resolution> {
        let project = self
            .registry
            .find_owning_project(path, revision)
            .inspect_err(|e| warn!(error = %e, %path, %revision, "registry lookup failed"))
            .ok()??;

        debug!(project = %project.project_id, slug = %project.slug, %path, "owning project found");

        let chain = self
            .registry
            .ancestry_chain(project.project_id)
            .inspect_err(|e| warn!(error = %e, project = %project.project_id, "ancestry walk failed"))
            .ok()?;

        if chain.is_empty() {
            debug!(project = %project.project_id, "owning project vanished from registry");
            return None;
        }

        Some(Resolution::Tracker {
            chain,
            revision: revision.clone(),
        })
    }
}
