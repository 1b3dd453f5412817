//! Configuration schema.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Mirror storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Project registry configuration.
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Redirect target configuration.
    #[serde(default)]
    pub urls: UrlsConfig,
}

impl Config {
    /// Checks values that deserialize fine but cannot work.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "server.request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        for (field, value) in [
            ("urls.tracker", &self.urls.tracker),
            ("urls.browser", &self.urls.browser),
            ("urls.portal", &self.urls.portal),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{field} must not be empty")));
            }
        }

        Ok(())
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Upper bound on the time spent resolving one request.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Returns the request timeout as a [`Duration`].
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:4567".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

/// Mirror storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the mirrored repositories.
    #[serde(default = "default_repositories_root")]
    pub repositories_root: PathBuf,

    /// Directory holding one mapping file per repository identifier.
    #[serde(default = "default_mappings_dir")]
    pub mappings_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            repositories_root: default_repositories_root(),
            mappings_dir: default_mappings_dir(),
        }
    }
}

fn default_repositories_root() -> PathBuf {
    PathBuf::from("/repositories")
}

fn default_mappings_dir() -> PathBuf {
    PathBuf::from("/home/git/repo-uid-mappings")
}

/// Project registry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Registry database file.
    #[serde(default = "default_database")]
    pub database: PathBuf,

    /// Prefix added to repository paths before comparing them with the
    /// registered repository URL (e.g. "/repositories").
    #[serde(default)]
    pub path_prefix: String,

    /// How long a query waits on a locked database.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl RegistryConfig {
    /// Returns the busy timeout as a [`Duration`].
    #[must_use]
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            path_prefix: String::new(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

fn default_database() -> PathBuf {
    PathBuf::from("/var/lib/revlink/registry.sqlite")
}

fn default_busy_timeout_ms() -> u64 {
    2000
}

/// Redirect target configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlsConfig {
    /// Project tracker base URL.
    #[serde(default = "default_tracker")]
    pub tracker: String,

    /// Code browser base URL.
    #[serde(default = "default_browser")]
    pub browser: String,

    /// Portal URL used when nothing resolves.
    #[serde(default = "default_portal")]
    pub portal: String,
}

impl Default for UrlsConfig {
    fn default() -> Self {
        Self {
            tracker: default_tracker(),
            browser: default_browser(),
            portal: default_portal(),
        }
    }
}

fn default_tracker() -> String {
    "http://projects.kde.org".to_string()
}

fn default_browser() -> String {
    "http://gitweb.kde.org".to_string()
}

fn default_portal() -> String {
    "http://projects.kde.org".to_string()
}
