//! Startup settings for the logger.

use super::error::{ConfigError, ConfigResult};
use crate::logger::{parse_code_list, LogType, Logger, DEFAULT_COLUMN_CODE, DEFAULT_ROW_CODE};
use serde::{Deserialize, Deserializer, Serialize};

/// Prefix shared by every logger setting key.
pub const KEY_PREFIX: &str = "logger>";

/// Startup settings, as read by the host's bootstrap.
///
/// In a TOML file these live in a `[logger]` table whose keys are the part
/// after `logger>`:
///
/// ```toml
/// [logger]
/// types = "developer,error"
/// target = "console"
/// "row delimiter" = "13+10"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerSettings {
    /// Comma-separated enabled types.
    pub types: String,

    /// Raw target string; `None` leaves logging unconfigured.
    pub target: Option<String>,

    /// Column delimiter code list (`+`-joined). A bare integer is one code.
    #[serde(rename = "column delimiter", deserialize_with = "code_list")]
    pub column_delimiter: String,

    /// Row delimiter code list (`+`-joined).
    #[serde(rename = "row delimiter", deserialize_with = "code_list")]
    pub row_delimiter: String,

    /// Whether records embed their type tag.
    #[serde(rename = "include log type")]
    pub include_log_type: bool,

    /// Network sanitizer rules, one `pattern<TAB>replacement` per line.
    #[serde(rename = "network filters")]
    pub network_filters: String,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            types: LogType::DEFAULT_ENABLED.join(","),
            target: None,
            column_delimiter: DEFAULT_COLUMN_CODE.to_string(),
            row_delimiter: DEFAULT_ROW_CODE.to_string(),
            include_log_type: true,
            network_filters: String::new(),
        }
    }
}

impl LoggerSettings {
    /// Create default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build settings from raw `logger>...` key/value pairs.
    ///
    /// Keys are matched case-insensitively; keys outside the `logger>`
    /// namespace and unknown logger keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if `logger>include log type` is not a boolean.
    pub fn from_pairs<I, K, V>(pairs: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut settings = Self::default();

        for (key, value) in pairs {
            let key = key.as_ref().trim().to_ascii_lowercase();
            let Some(name) = key.strip_prefix(KEY_PREFIX) else {
                continue;
            };
            let value = value.into();

            match name {
                "types" => settings.types = value,
                "target" => settings.target = Some(value),
                "column delimiter" => settings.column_delimiter = value,
                "row delimiter" => settings.row_delimiter = value,
                "include log type" => {
                    settings.include_log_type =
                        parse_bool(&value).ok_or_else(|| ConfigError::InvalidValue {
                            key: key.clone(),
                            message: format!("expected a boolean, got '{value}'"),
                        })?;
                },
                "network filters" => settings.network_filters = value,
                _ => {},
            }
        }

        Ok(settings)
    }

    /// Push these settings into a logger through its setters.
    pub fn apply(&self, logger: &Logger) {
        logger.set_types_str(&self.types);
        logger.set_column_delimiter(&parse_code_list(&self.column_delimiter));
        logger.set_row_delimiter(&parse_code_list(&self.row_delimiter));
        logger.set_include_log_type(self.include_log_type);
        logger.set_network_filters_blob(&self.network_filters);

        // Target last, so nothing is logged against half-applied settings
        if let Some(target) = &self.target {
            logger.set_target(target);
        }
    }
}

fn code_list<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Codes(String),
        Code(u32),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Codes(codes) => codes,
        Raw::Code(code) => code.to_string(),
    })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}
