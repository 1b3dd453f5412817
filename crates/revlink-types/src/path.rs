//! Canonical repository paths.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::InputError;

/// Strips every trailing `/` from `s`.
///
/// The root path `/` becomes the empty string.
#[must_use]
pub fn trim_trailing_separators(s: &str) -> &str {
    s.trim_end_matches('/')
}

/// A normalized repository path.
///
/// Always starts with `/`, never ends with one, has no empty, `.` or `..`
/// components. This is the join key between the identifier store, the
/// repository inspector and the project registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CanonicalPath(String);

impl CanonicalPath {
    /// Normalizes a raw path.
    ///
    /// A leading separator is optional; repeated separators collapse and
    /// trailing ones are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Path`] if the path has no components or contains
    /// `.`/`..`.
    pub fn normalize(raw: &str) -> Result<Self, InputError> {
        let mut normalized = String::with_capacity(raw.len() + 1);

        for component in raw.split('/').filter(|c| !c.is_empty()) {
            if component == "." || component == ".." {
                return Err(InputError::Path(raw.to_string()));
            }
            normalized.push('/');
            normalized.push_str(component);
        }

        if normalized.is_empty() {
            return Err(InputError::Path(raw.to_string()));
        }

        Ok(Self(normalized))
    }

    /// Returns the path with its leading separator.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the path without its leading separator.
    #[must_use]
    pub fn relative(&self) -> &str {
        &self.0[1..]
    }

    /// Resolves this path under `root`.
    #[must_use]
    pub fn under(&self, root: impl AsRef<Path>) -> PathBuf {
        root.as_ref().join(self.relative())
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
