//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - `default_duration_min`: scheduled duration used when `session create`
//!   is given no `--duration`
//! - `history_limit`: default cap for `session history`
//!
//! Configuration is stored at `~/.config/deepwork/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::ConfigError;

fn default_duration_min() -> u32 {
    50
}

fn default_history_limit() -> usize {
    20
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/deepwork/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_duration_min")]
    pub default_duration_min: u32,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_duration_min: default_duration_min(),
            history_limit: default_history_limit(),
        }
    }
}

impl Config {
    fn config_path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load the configuration, falling back to defaults when the file does
    /// not exist yet.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load the configuration, swallowing errors into the defaults.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Save the configuration.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&contents).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, contents).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get a config value by key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "default_duration_min" => Some(self.default_duration_min.to_string()),
            "history_limit" => Some(self.history_limit.to_string()),
            _ => None,
        }
    }

    /// Set a config value by key.
    ///
    /// # Errors
    /// Returns an error for an unknown key or an unparseable value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "default_duration_min" => {
                let minutes: u32 = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("expected an integer, got '{value}'"),
                })?;
                if minutes == 0 || minutes > crate::session::SCHEDULED_MINUTES_MAX {
                    return Err(ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: format!("must be between 1 and 480, got {minutes}"),
                    });
                }
                self.default_duration_min = minutes;
            }
            "history_limit" => {
                let limit: usize = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("expected an integer, got '{value}'"),
                })?;
                self.history_limit = limit;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}
