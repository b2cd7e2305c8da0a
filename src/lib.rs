//! # applog
//!
//! Runtime logging for interactive applications: every call is filtered by
//! log type, formatted with a timestamp, and routed to exactly one active
//! target.
//!
//! ## Features
//!
//! - Built-in and custom log types, toggled at runtime
//! - Console, file, UI container and modal notice targets
//! - Configurable column/row delimiters and optional type tags
//! - Ordered redaction rules for network traffic messages
//! - Suspend/resume without losing configuration
//! - Verbose-logging bridge for external subsystems
//!
//! ## Architecture
//!
//! [`Logger`] owns all configuration behind a single lock and runs the
//! filtering pipeline. The [`config`] module turns startup settings into
//! setter calls; the logger never reads settings on its own.
//!
//! ```no_run
//! use applog::{Logger, NetworkFilters};
//!
//! let logger = Logger::new();
//! logger.set_target("console");
//! logger.set_types_str("developer,network");
//! logger.set_network_filters(NetworkFilters::from_pairs([("token=\\w+", "token=***")]));
//!
//! logger.log("GET /index token=abc\r\n", "network")?;
//! # Ok::<(), applog::WriteError>(())
//! ```

pub mod config;
pub mod global;
pub mod logger;

pub use global::global;
pub use logger::{
    LogType, Logger, LoggerMetrics, MemoryHost, NetworkFilters, NoticeOutcome, Target, UiHost,
    VerboseSink, WriteError, WriteResult,
};
