//! Shared value types for revlink.
//!
//! This crate provides the types that flow between the resolver and its
//! collaborators:
//! - [`RepositoryIdentifier`]: An opaque client-supplied repository token
//! - [`CanonicalPath`]: The normalized repository path used as a join key
//! - [`RevisionReference`]: A possibly-abbreviated commit hash from the client
//! - [`CanonicalRevision`]: A fully-resolved commit hash
//! - [`ProjectId`] and [`ProjectMatch`]: Project registry handles

mod error;
mod identifier;
mod path;
mod project;
mod revision;

pub use error::InputError;
pub use identifier::RepositoryIdentifier;
pub use path::{CanonicalPath, trim_trailing_separators};
pub use project::{ProjectId, ProjectMatch};
pub use revision::{CanonicalRevision, FULL_HASH_LEN, RevisionReference};
