//! File-backed identifier store.
//!
//! An external job keeps one file per identifier under the mappings
//! directory; its content is the repository path relative to the
//! repositories root.

use std::path::PathBuf;

use revlink_types::{CanonicalPath, RepositoryIdentifier};
use tracing::debug;

use crate::IdentifierStore;

/// Identifier store reading one mapping file per identifier.
#[derive(Debug, Clone)]
pub struct MappingDirectory {
    mappings_dir: PathBuf,
    repositories_root: PathBuf,
}

impl MappingDirectory {
    /// Creates a store over `mappings_dir`, checking targets under
    /// `repositories_root`.
    #[must_use]
    pub fn new(mappings_dir: impl Into<PathBuf>, repositories_root: impl Into<PathBuf>) -> Self {
        Self {
            mappings_dir: mappings_dir.into(),
            repositories_root: repositories_root.into(),
        }
    }

    /// Returns the mapping file for `identifier`.
    fn mapping_file(&self, identifier: &RepositoryIdentifier) -> PathBuf {
        identifier
            .components()
            .fold(self.mappings_dir.clone(), |dir, component| dir.join(component))
    }
}

impl IdentifierStore for MappingDirectory {
    fn resolve_path(&self, identifier: &RepositoryIdentifier) -> Option<CanonicalPath> {
        let file = self.mapping_file(identifier);

        let content = match std::fs::read_to_string(&file) {
            Ok(content) => content,
            Err(e) => {
                debug!(%identifier, error = %e, "identifier has no mapping");
                return None;
            }
        };

        let path = match CanonicalPath::normalize(content.trim()) {
            Ok(path) => path,
            Err(e) => {
                debug!(%identifier, error = %e, "mapping does not hold a usable path");
                return None;
            }
        };

        if !path.under(&self.repositories_root).is_dir() {
            debug!(%identifier, %path, "mapped repository is missing on disk");
            return None;
        }

        Some(path)
    }
}
