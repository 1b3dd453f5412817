//! Core library for revlink.
//!
//! This crate turns a repository identifier and a revision into the public URL
//! for that commit. It provides:
//! - [`IdentifierStore`], [`RepositoryInspector`], [`ProjectRegistry`]: the
//!   collaborators the resolver consults, with their production backends
//! - [`MappingDirectory`]: the file-backed identifier store
//! - [`Resolver`]: the fallback policy from tracker to browser to portal
//! - [`UrlBuilder`]: rendering of the three redirect targets

mod error;
mod mapping;
mod resolver;
mod traits;
mod urls;

pub use error::{CoreError, CoreResult};
pub use mapping::MappingDirectory;
pub use resolver::{Resolution, Resolver};
pub use traits::{IdentifierStore, ProjectRegistry, RepositoryInspector};
pub use urls::UrlBuilder;
