//! Git abstraction layer for revlink.
//!
//! This crate provides Git operations:
//! - Opening mirrored repositories
//! - Resolving abbreviated commit hashes
//! - Refreshing bare mirrors from their origin

mod error;
mod inspector;
mod repository;

pub use error::{GitError, GitResult};
pub use inspector::GitInspector;
pub use repository::Repository;
