//! Settings error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading logger settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the settings file.
    #[error("failed to read settings file '{path}': {source}")]
    ReadError {
        /// Path to the settings file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid setting value.
    #[error("invalid value for setting '{key}': {message}")]
    InvalidValue {
        /// Setting key.
        key: String,
        /// Error message.
        message: String,
    },

    /// Settings file not found.
    #[error("settings file not found: {0}")]
    NotFound(PathBuf),
}

/// Result type for settings operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
