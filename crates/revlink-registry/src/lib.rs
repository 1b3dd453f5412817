//! Project registry access for revlink.
//!
//! The registry is an externally maintained hierarchy of projects plus an
//! index from changeset revisions to the repositories that contain them.
//! This crate only reads it:
//! - [`SqliteRegistry`]: queries against the registry database
//! - [`SupervisedConnection`]: one guarded connection with reconnect-and-retry
//! - [`ancestry_chain`]: bounded parent walk from a project to its root

mod ancestry;
mod error;
mod matching;
mod sqlite;
mod supervisor;

pub use ancestry::{MAX_ANCESTRY_DEPTH, ProjectNode, ancestry_chain};
pub use error::{RegistryError, RegistryResult};
pub use matching::registered_path_matches;
pub use sqlite::{SCHEMA, SqliteConnector, SqliteRegistry};
pub use supervisor::{Connector, SupervisedConnection};
