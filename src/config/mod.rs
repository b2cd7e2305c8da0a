//! # Settings
//!
//! Startup settings for the logger, read from raw `logger>...` key/value
//! pairs or from a TOML file, and pushed into a [`crate::Logger`] through its
//! setters. The logger itself never reads settings.
//!
//! ## Example Settings File
//!
//! ```toml
//! [logger]
//! types = "developer,error,network"
//! target = "/var/log/app.log"
//! "column delimiter" = "9"
//! "row delimiter" = "13+10"
//! "include log type" = true
//! ```

mod error;
mod loader;
mod settings;

pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use settings::{LoggerSettings, KEY_PREFIX};
