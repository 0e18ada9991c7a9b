//! TOML-based application configuration.
//!
//! Holds the few settings that outlive a session but aren't study data:
//! the custom preset's shape and an optional default preset.
//!
//! Configuration is stored at `~/.config/study-catcher/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

use super::data_dir;

/// Persisted shape of the mutable custom preset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomPresetConfig {
    #[serde(default = "default_custom_duration")]
    pub duration_min: u32,
    #[serde(default = "default_custom_intervals")]
    pub intervals: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data dir>/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub custom_preset: CustomPresetConfig,
    /// Preset selected automatically at startup, if any.
    #[serde(default)]
    pub default_preset: Option<String>,
}

fn default_custom_duration() -> u32 {
    45
}
fn default_custom_intervals() -> u32 {
    1
}

impl Default for CustomPresetConfig {
    fn default() -> Self {
        Self {
            duration_min: default_custom_duration(),
            intervals: default_custom_intervals(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            custom_preset: CustomPresetConfig::default(),
            default_preset: None,
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("<data dir>"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing and returning the default when the file is
    /// missing.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be parsed, or the
    /// default cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Load from disk, returning the default on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a config value as a string by key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "custom_preset.duration_min" => Some(self.custom_preset.duration_min.to_string()),
            "custom_preset.intervals" => Some(self.custom_preset.intervals.to_string()),
            "default_preset" => Some(
                self.default_preset
                    .clone()
                    .unwrap_or_else(|| "none".to_string()),
            ),
            _ => None,
        }
    }

    /// Set a config value by key without touching the disk.
    ///
    /// # Errors
    /// Returns an error for unknown keys and unparseable values.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "custom_preset.duration_min" => {
                let parsed = parse_positive(key, value)?;
                self.custom_preset.duration_min = parsed;
            }
            "custom_preset.intervals" => {
                self.custom_preset.intervals =
                    value.parse().map_err(|_| ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: format!("cannot parse '{value}' as a number"),
                    })?;
            }
            "default_preset" => {
                self.default_preset = if value == "none" {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Set a config value by key and persist the result.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.set_value(key, value)?;
        self.save()
    }
}

fn parse_positive(key: &str, value: &str) -> Result<u32, ConfigError> {
    let parsed: u32 = value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("cannot parse '{value}' as a number"),
    })?;
    if parsed == 0 {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "must be positive".to_string(),
        });
    }
    Ok(parsed)
}
