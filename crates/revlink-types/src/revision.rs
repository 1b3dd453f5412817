//! Revision references and canonical revisions.

use std::fmt;

use serde::Serialize;

use crate::InputError;

/// Length of a full SHA-1 commit hash in hex.
pub const FULL_HASH_LEN: usize = 40;

/// A client-supplied, possibly abbreviated, commit hash.
///
/// Never longer than [`FULL_HASH_LEN`]: a longer string cannot name a commit,
/// so it is rejected before any repository is opened.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RevisionReference(String);

impl RevisionReference {
    /// Validates a raw revision string.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Revision`] if the text is empty, longer than
    /// [`FULL_HASH_LEN`] or not ASCII alphanumeric.
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        let valid = !raw.is_empty()
            && raw.len() <= FULL_HASH_LEN
            && raw.bytes().all(|b| b.is_ascii_alphanumeric());

        if valid {
            Ok(Self(raw.to_string()))
        } else {
            Err(InputError::Revision(raw.to_string()))
        }
    }

    /// Returns the reference text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RevisionReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fully-resolved commit hash: [`FULL_HASH_LEN`] lowercase hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CanonicalRevision(String);

impl CanonicalRevision {
    /// Wraps a full hash, lowercasing it.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Revision`] unless `hash` is exactly
    /// [`FULL_HASH_LEN`] hex digits.
    pub fn new(hash: &str) -> Result<Self, InputError> {
        if hash.len() == FULL_HASH_LEN && hash.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self(hash.to_ascii_lowercase()))
        } else {
            Err(InputError::Revision(hash.to_string()))
        }
    }

    /// Returns the hash text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
