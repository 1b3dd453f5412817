//! Configuration management for revlink.
//!
//! This crate handles locating, loading and validating `revlink.toml`.

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{
    CONFIG_FILE_NAME, ConfigSource, load_config, load_config_from, load_config_or_default,
    locate_config,
};
pub use schema::{Config, RegistryConfig, ServerConfig, StorageConfig, UrlsConfig};
