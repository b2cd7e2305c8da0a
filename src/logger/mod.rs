//! # Logger Core
//!
//! Type-filtered logging routed to one active target.
//!
//! ## Pipeline
//!
//! Every [`Logger::log`] call is triaged in a fixed order: no target set,
//! logger suspended, type disabled. Any of these returns `Ok` without
//! formatting. Messages of the `network` type are then sanitized (trailing
//! noise stripped, CRLF collapsed, redaction rules applied in order) and
//! dropped if nothing is left. The record is formatted and written to the
//! target; only a failed write is reported.
//!
//! ## Targets
//!
//! - Console (stdout)
//! - File (append, opened per record)
//! - UI container owned by a [`UiHost`]
//! - Modal notice presented by a [`UiHost`]

pub mod bridge;
pub mod error;
pub mod format;
pub mod gate;
pub mod handler;
pub mod host;
pub mod output;
pub mod sanitize;
pub mod target;
pub mod types;

pub use bridge::*;
pub use error::*;
pub use format::*;
pub use gate::*;
pub use handler::*;
pub use host::*;
pub use output::*;
pub use sanitize::*;
pub use target::*;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_exports() {
        let _logger = Logger::new();
        let _target = Target::Console;
        let _filters = NetworkFilters::new();
        let _delimiters = Delimiters::default();
        assert_eq!(LogType::BUILT_IN.len(), 5);
    }
}
