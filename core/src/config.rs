//! Configuration persistence
//!
//! Loads and saves per-profile shell settings as TOML files in the platform
//! config directory.

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Error type for configuration operations
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to determine config directory
    NoConfigDir,
    /// IO error while reading/writing config
    Io(io::Error),
    /// Failed to parse config file
    Parse(toml::de::Error),
    /// Failed to serialize config
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoConfigDir => write!(f, "Could not determine config directory"),
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::NoConfigDir => None,
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Serialize(e) => Some(e),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

/// Base configuration directory shared by every shell profile
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "round-shell", "shell").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Configuration file path for a profile
pub fn config_path(profile: &str) -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(format!("{}.toml", profile)))
}

/// Load the configuration stored for `profile`
///
/// Returns `None` if the profile has never been saved.
pub fn load_config<T: DeserializeOwned>(profile: &str) -> Result<Option<T>, ConfigError> {
    let path = config_path(profile).ok_or(ConfigError::NoConfigDir)?;
    load_config_from(&path)
}

/// Load a configuration from an explicit file
pub fn load_config_from<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    let config: T = toml::from_str(&contents)?;
    log::debug!("loaded config from {}", path.display());
    Ok(Some(config))
}

/// Save the configuration for `profile`
pub fn save_config<T: Serialize>(profile: &str, config: &T) -> Result<(), ConfigError> {
    let path = config_path(profile).ok_or(ConfigError::NoConfigDir)?;
    save_config_to(&path, config)
}

/// Save a configuration to an explicit file, creating parent directories
pub fn save_config_to<T: Serialize>(path: &Path, config: &T) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(config)?;
    fs::write(path, contents)?;
    log::debug!("saved config to {}", path.display());
    Ok(())
}

/// Delete the stored configuration for `profile`
pub fn delete_config(profile: &str) -> Result<(), ConfigError> {
    let path = config_path(profile).ok_or(ConfigError::NoConfigDir)?;

    if path.exists() {
        fs::remove_file(&path)?;
    }
    Ok(())
}
