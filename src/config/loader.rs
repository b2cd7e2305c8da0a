//! Settings file loader.

use super::error::{ConfigError, ConfigResult};
use super::settings::LoggerSettings;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings file layout: a single `[logger]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct SettingsFile {
    logger: LoggerSettings,
}

/// Loads [`LoggerSettings`] from TOML.
#[derive(Debug, Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Create a new loader.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Load settings from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist
    /// - The file cannot be read
    /// - The TOML is malformed
    pub fn load<P: AsRef<Path>>(&self, path: P) -> ConfigResult<LoggerSettings> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        self.load_str(&content)
    }

    /// Load settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed.
    pub fn load_str(&self, content: &str) -> ConfigResult<LoggerSettings> {
        let file: SettingsFile = toml::from_str(content)?;
        Ok(file.logger)
    }

    /// Load settings or return defaults if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default<P: AsRef<Path>>(&self, path: P) -> ConfigResult<LoggerSettings> {
        let path = path.as_ref();
        if path.exists() {
            self.load(path)
        } else {
            Ok(LoggerSettings::default())
        }
    }
}
