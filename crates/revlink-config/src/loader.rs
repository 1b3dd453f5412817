//! Configuration discovery and loading.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Config, ConfigError, ConfigResult};

/// Configuration file searched for in the working directory and its parents.
pub const CONFIG_FILE_NAME: &str = "revlink.toml";

/// Where a loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from this file.
    File(PathBuf),
    /// No file was found; built-in defaults apply.
    Defaults,
}

/// Reads, parses and validates the configuration file at `path`.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if `path` does not exist, otherwise the
/// read, parse or validation error.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Config> {
    let path = path.as_ref();
    debug!(?path, "loading configuration");

    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound(path.to_path_buf())
        } else {
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;

    Ok(config)
}

/// Returns the nearest [`CONFIG_FILE_NAME`] in `start_dir` or an ancestor.
#[must_use]
pub fn locate_config(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Loads `explicit` if given, else the nearest config file above
/// `start_dir`, else the defaults.
///
/// A missing explicit file is an error; a missing discovered file is not.
///
/// # Errors
///
/// Returns an error if the selected file cannot be loaded.
pub fn load_config_from(
    explicit: Option<&Path>,
    start_dir: &Path,
) -> ConfigResult<(Config, ConfigSource)> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match locate_config(start_dir) {
            Some(path) => path,
            None => {
                debug!(dir = ?start_dir, "no configuration file found, using defaults");
                return Ok((Config::default(), ConfigSource::Defaults));
            }
        },
    };

    let config = load_config(&path)?;
    Ok((config, ConfigSource::File(path)))
}

/// [`load_config_from`] starting at the current directory.
///
/// # Errors
///
/// Returns an error if the current directory is unavailable or the selected
/// file cannot be loaded.
pub fn load_config_or_default(explicit: Option<&Path>) -> ConfigResult<(Config, ConfigSource)> {
    let current_dir = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
    load_config_from(explicit, &current_dir)
}
