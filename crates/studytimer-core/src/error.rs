//! Core error types for studytimer-core.
//!
//! This module defines the error hierarchy using thiserror so that callers
//! can tell storage failures apart from configuration and validation ones.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studytimer-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Session history storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while reading or writing the session history file.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The file exists but could not be read
    #[error("Failed to read session history at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file could not be written or replaced
    #[error("Failed to write session history at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file contents are not a valid history document
    #[error("Session history at {path} is not valid: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// A study or break duration of zero seconds
    #[error("'{field}' must be greater than zero seconds")]
    ZeroDuration { field: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_errors_keep_their_message() {
        let err: CoreError = ValidationError::ZeroDuration {
            field: "timer.study_secs".into(),
        }
        .into();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Validation error: 'timer.study_secs' must be greater than zero seconds"
        );

        let err: CoreError = StorageError::Read {
            path: PathBuf::from("/tmp/history.json"),
            source: std::io::Error::other("denied"),
        }
        .into();
        assert!(err.to_string().starts_with("Storage error: Failed to read session history"));
    }

    #[test]
    fn alias_defaults_to_core_error() {
        fn open() -> Result<u32> {
            let parsed: Vec<u32> = serde_json::from_str("not json")?;
            Ok(parsed.len() as u32)
        }
        assert!(matches!(open(), Err(CoreError::Json(_))));
    }
}
