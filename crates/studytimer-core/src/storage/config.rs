//! TOML-based application configuration.
//!
//! Stores:
//! - Study and break interval lengths
//! - Completion alert preferences
//! - An optional override for the session history file
//!
//! Configuration is stored at `~/.config/studytimer/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{data_dir, HISTORY_FILE_NAME};
use crate::error::{ConfigError, ValidationError};
use crate::timer::{Durations, DEFAULT_BREAK_SECS, DEFAULT_STUDY_SECS};

/// Interval lengths in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_study_secs")]
    pub study_secs: u32,
    #[serde(default = "default_break_secs")]
    pub break_secs: u32,
}

/// Completion alert configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Sound file handed to `player`. Relative paths resolve against the
    /// working directory.
    #[serde(default = "default_sound_file")]
    pub sound_file: String,
    /// External command used to play `sound_file`, e.g. `paplay` or
    /// `afplay`. The terminal bell is used when unset.
    #[serde(default)]
    pub player: Option<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studytimer/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub alert: AlertConfig,
    /// Where the session history lives. Defaults to the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_file: Option<PathBuf>,
}

fn default_study_secs() -> u32 {
    DEFAULT_STUDY_SECS
}
fn default_break_secs() -> u32 {
    DEFAULT_BREAK_SECS
}
fn default_true() -> bool {
    true
}
fn default_sound_file() -> String {
    "alert.wav".into()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            study_secs: default_study_secs(),
            break_secs: default_break_secs(),
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sound_file: default_sound_file(),
            player: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
            alert: AlertConfig::default(),
            history_file: None,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let new_value = match obj.get(part) {
                    Some(serde_json::Value::Bool(_)) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    Some(serde_json::Value::Number(_)) => {
                        let n = value.parse::<u32>().map_err(|e| invalid(e.to_string()))?;
                        serde_json::Value::Number(n.into())
                    }
                    Some(serde_json::Value::String(_) | serde_json::Value::Null) => {
                        serde_json::Value::String(value.into())
                    }
                    // Optional keys that are currently unset.
                    None if is_optional_key(key) => serde_json::Value::String(value.into()),
                    _ => return Err(unknown()),
                };
                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// `<data dir>/config.toml`
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from the default location, writing defaults there if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, validate, and save to the
    /// default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// the result fails validation, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Set a value in memory only.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| {
            ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            }
        })?;
        updated.durations().map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        *self = updated;
        Ok(())
    }

    /// Validated study and break durations.
    pub fn durations(&self) -> Result<Durations, ValidationError> {
        Durations::new(self.timer.study_secs, self.timer.break_secs)
    }

    /// The configured history file, or the default one in the data directory.
    pub fn history_path(&self) -> std::io::Result<PathBuf> {
        match &self.history_file {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join(HISTORY_FILE_NAME)),
        }
    }
}

fn is_optional_key(key: &str) -> bool {
    matches!(key, "history_file" | "alert.player")
}
