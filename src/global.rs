//! Process-wide logger instance
//!
//! Hosts that prefer a single ambient logger can use [`global`] instead of
//! passing a [`Logger`] around. It is an ordinary logger and shares the same
//! locking; nothing else in the crate depends on it.

use crate::logger::{LogType, Logger, WriteResult};
use once_cell::sync::Lazy;

static GLOBAL: Lazy<Logger> = Lazy::new(Logger::new);

/// The process-wide logger
pub fn global() -> &'static Logger {
    &GLOBAL
}

/// Log through the process-wide logger
pub fn log(message: &str, log_type: &str) -> WriteResult<()> {
    GLOBAL.log(message, log_type)
}

/// Log a `developer` message through the process-wide logger
pub fn log_default(message: &str) -> WriteResult<()> {
    GLOBAL.log(message, LogType::DEVELOPER)
}
