//! The logger: configuration state plus the `log` pipeline

use super::bridge::{ExternalLoggerBridge, VerboseSink};
use super::error::WriteResult;
use super::format::{delimiter_from_codes, format_record, timestamp_now, Delimiters};
use super::gate::SuspendGate;
use super::host::UiHost;
use super::output::{create_output, ConsoleOutput, LogOutput};
use super::sanitize::{sanitize, NetworkFilters};
use super::target::{Target, TargetKind};
use super::types::{FilterRegistry, LogType};
use std::borrow::Cow;
use std::sync::atomic::{AtomicU64, Ordering};
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use tracing::{debug, warn};

/// Delivery counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggerMetrics {
    /// Records handed to the target successfully
    pub records_written: u64,

    /// Calls skipped because their type was disabled
    pub records_filtered: u64,

    /// Network messages the sanitizer reduced to nothing
    pub records_dropped: u64,

    /// Writes that returned an error
    pub write_errors: u64,
}

#[derive(Debug, Default)]
struct Counters {
    written: AtomicU64,
    filtered: AtomicU64,
    dropped: AtomicU64,
    errors: AtomicU64,
}

impl Counters {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> LoggerMetrics {
        LoggerMetrics {
            records_written: self.written.load(Ordering::Relaxed),
            records_filtered: self.filtered.load(Ordering::Relaxed),
            records_dropped: self.dropped.load(Ordering::Relaxed),
            write_errors: self.errors.load(Ordering::Relaxed),
        }
    }
}

/// Shared configuration guarded by the logger's lock
struct LoggerState {
    registry: FilterRegistry,
    delimiters: Delimiters,
    target: Target,
    output: Arc<dyn LogOutput>,
    filters: NetworkFilters,
    include_type: bool,
    host: Option<Arc<dyn UiHost>>,
    dialog_timeout: Option<Duration>,
    console: Arc<ConsoleOutput>,
}

impl LoggerState {
    fn rebuild_output(&mut self) {
        self.output = match &self.target {
            Target::Console => Arc::clone(&self.console) as Arc<dyn LogOutput>,
            target => create_output(target, self.host.clone(), self.dialog_timeout),
        };
    }

    /// Rebuild only if the active output was built from `host` or `dialog_timeout`
    fn rebuild_host_output(&mut self) {
        if matches!(self.target.kind(), TargetKind::UiContainer | TargetKind::Dialog) {
            self.rebuild_output();
        }
    }
}

impl Default for LoggerState {
    fn default() -> Self {
        let target = Target::None;
        Self {
            registry: FilterRegistry::new(),
            delimiters: Delimiters::default(),
            output: create_output(&target, None, None),
            target,
            filters: NetworkFilters::new(),
            include_type: true,
            host: None,
            dialog_timeout: None,
            console: Arc::new(ConsoleOutput::new()),
        }
    }
}

/// Type-filtered logger routing records to a single target.
///
/// All setters and `log` take `&self`; a logger is shared between threads
/// behind an `Arc` (or through [`crate::global`]).
///
/// # Example
///
/// ```no_run
/// use applog::Logger;
///
/// let logger = Logger::new();
/// logger.set_target("/tmp/app.log");
/// logger.set_types_str("developer,error");
/// logger.log("loaded 3 plugins", "developer").unwrap();
/// ```
pub struct Logger {
    /// Configuration
    state: RwLock<LoggerState>,

    /// Suspend flag
    gate: SuspendGate,

    /// External verbose-logging switch
    bridge: ExternalLoggerBridge,

    /// Held from a types change through its bridge notification
    notify_lock: Mutex<()>,

    /// Metrics
    counters: Counters,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a logger with default settings and no target
    pub fn new() -> Self {
        Self {
            state: RwLock::new(LoggerState::default()),
            gate: SuspendGate::new(),
            bridge: ExternalLoggerBridge::new(),
            notify_lock: Mutex::new(()),
            counters: Counters::default(),
        }
    }

    /// Create a logger attached to a host UI
    pub fn with_host(host: Arc<dyn UiHost>) -> Self {
        let logger = Self::new();
        logger.set_host(host);
        logger
    }

    fn read_state(&self) -> RwLockReadGuard<'_, LoggerState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, LoggerState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_notify(&self) -> MutexGuard<'_, ()> {
        self.notify_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply a registry change and sync the bridge.
    ///
    /// The notify lock orders notifications the same way as the changes;
    /// the config lock is released before the sink runs.
    fn update_registry(&self, change: impl FnOnce(&mut FilterRegistry)) {
        let _notify = self.lock_notify();
        let network = {
            let mut state = self.write_state();
            change(&mut state.registry);
            state.registry.network_enabled()
        };
        self.bridge.notify(network);
    }

    /// Log a message of the given type.
    ///
    /// Returns `Ok` without writing anything when no target is set, the
    /// logger is suspended, the type is disabled, or a network message
    /// sanitizes to nothing. Only a failed write is an error.
    pub fn log(&self, message: &str, log_type: &str) -> WriteResult<()> {
        let (output, record) = {
            let state = self.read_state();

            if state.target.is_none() {
                return Ok(());
            }
            if self.gate.is_suspended() {
                return Ok(());
            }
            if !state.registry.is_enabled(log_type) {
                Counters::bump(&self.counters.filtered);
                return Ok(());
            }

            let message = if log_type == LogType::NETWORK {
                let sanitized = sanitize(message, &state.filters);
                if sanitized.is_empty() {
                    Counters::bump(&self.counters.dropped);
                    return Ok(());
                }
                Cow::Owned(sanitized)
            } else {
                Cow::Borrowed(message)
            };

            let record = format_record(
                &message,
                log_type,
                &timestamp_now(),
                &state.delimiters,
                state.include_type,
            );

            (Arc::clone(&state.output), record)
        };

        // The lock is released; a concurrent target change cannot touch this write
        match output.write(&record) {
            Ok(()) => {
                Counters::bump(&self.counters.written);
                Ok(())
            },
            Err(e) => {
                Counters::bump(&self.counters.errors);
                debug!(error = %e, "Log record write failed");
                Err(e)
            },
        }
    }

    /// Log a message with the `developer` type
    pub fn log_default(&self, message: &str) -> WriteResult<()> {
        self.log(message, LogType::DEVELOPER)
    }

    /// Set the target from a raw setting string
    pub fn set_target(&self, raw: &str) {
        // Resolve outside the lock; the host may call back into the logger
        let host = self.read_state().host.clone();
        let target = Target::parse(raw, host.as_deref());
        self.set_target_value(target);
    }

    /// Replace the active target
    pub fn set_target_value(&self, target: Target) {
        let previous = {
            let mut state = self.write_state();
            let previous = std::mem::replace(&mut state.target, target);
            state.rebuild_output();
            previous
        };

        debug!(from = %previous, to = %self.target(), "Log target changed");
    }

    /// Current target in setting form; empty when unset
    pub fn target(&self) -> String {
        self.read_state().target.as_setting()
    }

    /// Kind of the current target
    pub fn target_kind(&self) -> TargetKind {
        self.read_state().target.kind()
    }

    /// Replace the enabled types. `"all"` enables every built-in type.
    pub fn set_types<I, T>(&self, names: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<LogType>,
    {
        self.update_registry(|registry| registry.set_types(names));
    }

    /// Replace the enabled types from a comma-separated list
    pub fn set_types_str(&self, list: &str) {
        self.set_types(LogType::parse_list(list));
    }

    /// Enabled types, sorted
    pub fn types(&self) -> Vec<String> {
        self.read_state().registry.list_enabled()
    }

    /// Enabled types as a comma-separated list
    pub fn types_string(&self) -> String {
        self.types().join(",")
    }

    /// Enable one type
    pub fn add_type(&self, name: &str) {
        self.update_registry(|registry| registry.add_type(name));
    }

    /// Disable one type
    pub fn remove_type(&self, name: &str) {
        self.update_registry(|registry| registry.remove_type(name));
    }

    /// Check if a type is enabled
    pub fn is_type_enabled(&self, name: &str) -> bool {
        self.read_state().registry.is_enabled(name)
    }

    /// Replace the network sanitizer rules
    pub fn set_network_filters(&self, filters: NetworkFilters) {
        let invalid = filters.rules().iter().filter(|rule| !rule.is_valid()).count();
        if invalid > 0 {
            warn!(invalid, "Some network filter rules will be skipped");
        }
        self.write_state().filters = filters;
    }

    /// Replace the network sanitizer rules from a tab-delimited blob
    pub fn set_network_filters_blob(&self, blob: &str) {
        self.set_network_filters(NetworkFilters::parse(blob));
    }

    /// Current network sanitizer rules
    pub fn network_filters(&self) -> NetworkFilters {
        self.read_state().filters.clone()
    }

    /// Set the column delimiter from character codes
    pub fn set_column_delimiter(&self, codes: &[u32]) {
        self.write_state().delimiters.column = delimiter_from_codes(codes);
    }

    /// Set the row delimiter from character codes
    pub fn set_row_delimiter(&self, codes: &[u32]) {
        self.write_state().delimiters.row = delimiter_from_codes(codes);
    }

    /// Current column delimiter
    pub fn column_delimiter(&self) -> String {
        self.read_state().delimiters.column.clone()
    }

    /// Current row delimiter
    pub fn row_delimiter(&self) -> String {
        self.read_state().delimiters.row.clone()
    }

    /// Embed the type tag in every record, or not
    pub fn set_include_log_type(&self, include: bool) {
        self.write_state().include_type = include;
    }

    /// Whether records embed their type tag
    pub fn include_log_type(&self) -> bool {
        self.read_state().include_type
    }

    /// Mute all logging without touching configuration
    pub fn suspend(&self) {
        self.gate.suspend();
    }

    /// Undo [`Logger::suspend`]
    pub fn resume(&self) {
        self.gate.resume();
    }

    /// Check if logging is muted
    pub fn is_suspended(&self) -> bool {
        self.gate.is_suspended()
    }

    /// Attach the host UI used by container and dialog targets
    pub fn set_host(&self, host: Arc<dyn UiHost>) {
        let mut state = self.write_state();
        state.host = Some(host);
        state.rebuild_host_output();
    }

    /// Bound how long a dialog record may block the caller
    pub fn set_dialog_timeout(&self, timeout: Option<Duration>) {
        let mut state = self.write_state();
        state.dialog_timeout = timeout;
        state.rebuild_host_output();
    }

    /// Send console records to `writer` instead of stdout
    pub fn set_console_writer(&self, writer: impl Write + Send + 'static) {
        let mut state = self.write_state();
        state.console = Arc::new(ConsoleOutput::with_writer(writer));
        if state.target.kind() == TargetKind::Console {
            state.rebuild_output();
        }
    }

    /// Attach the external verbose-logging switch and sync it immediately.
    ///
    /// The sink may log through this logger but must not change its types.
    pub fn set_bridge(&self, sink: Arc<dyn VerboseSink>) {
        let _notify = self.lock_notify();
        self.bridge.install(sink);
        let network = self.read_state().registry.network_enabled();
        self.bridge.notify(network);
    }

    /// Detach the external verbose-logging switch, leaving it as last set
    pub fn clear_bridge(&self) {
        let _notify = self.lock_notify();
        self.bridge.clear();
    }

    /// Snapshot of the delivery counters
    pub fn metrics(&self) -> LoggerMetrics {
        self.counters.snapshot()
    }

    /// Flush the active target and detach it.
    ///
    /// Other settings are kept; logging resumes once a target is set again.
    pub fn shutdown(&self) {
        let output = {
            let mut state = self.write_state();
            let output = Arc::clone(&state.output);
            state.target = Target::None;
            state.rebuild_output();
            output
        };

        if let Err(e) = output.flush() {
            warn!(error = %e, "Failed to flush log target on shutdown");
        }
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read_state();
        f.debug_struct("Logger")
            .field("target", &state.target)
            .field("types", &state.registry.list_enabled())
            .field("include_type", &state.include_type)
            .field("filters", &state.filters.len())
            .field("suspended", &self.gate.is_suspended())
            .finish()
    }
}
