//! Verbose-logging bridge to an external subsystem
//!
//! Some libraries (a network stack, typically) keep their own verbose log
//! switch. The bridge flips that switch whenever the "network" type is
//! enabled or disabled here.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

/// Value sent to turn the bridged subsystem's verbose logging on
pub const BRIDGE_SENTINEL: &str = "applog";

/// Receiver of verbose-logging toggles.
///
/// An empty value turns verbose logging off; any other value turns it on.
pub trait VerboseSink: Send + Sync {
    /// Set the subsystem's verbose logging value
    fn set_verbose(&self, value: &str);
}

impl<F> VerboseSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn set_verbose(&self, value: &str) {
        self(value);
    }
}

/// Notifies the installed [`VerboseSink`], if any
#[derive(Default)]
pub struct ExternalLoggerBridge {
    sink: RwLock<Option<Arc<dyn VerboseSink>>>,
}

impl ExternalLoggerBridge {
    /// Create a bridge with no subsystem attached
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a subsystem, replacing any previous one
    pub fn install(&self, sink: Arc<dyn VerboseSink>) {
        *self.sink.write().unwrap_or_else(PoisonError::into_inner) = Some(sink);
    }

    /// Detach the subsystem
    pub fn clear(&self) {
        *self.sink.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Check if a subsystem is attached
    pub fn is_installed(&self) -> bool {
        self.sink
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Tell the subsystem whether network logging is on.
    ///
    /// Failures inside the subsystem are contained here.
    pub fn notify(&self, network_enabled: bool) {
        let sink = self
            .sink
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let Some(sink) = sink else {
            return;
        };

        let value = if network_enabled { BRIDGE_SENTINEL } else { "" };
        debug!(network_enabled, "Syncing external verbose logging");

        if panic::catch_unwind(AssertUnwindSafe(|| sink.set_verbose(value))).is_err() {
            warn!("External logger bridge panicked; ignoring");
        }
    }
}

impl std::fmt::Debug for ExternalLoggerBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalLoggerBridge")
            .field("installed", &self.is_installed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recording_sink() -> (Arc<Mutex<Vec<String>>>, Arc<dyn VerboseSink>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = Arc::clone(&seen);
        let sink: Arc<dyn VerboseSink> = Arc::new(move |value: &str| {
            sink_seen.lock().unwrap().push(value.to_string());
        });
        (seen, sink)
    }

    #[test]
    fn test_notify_values() {
        let bridge = ExternalLoggerBridge::new();
        let (seen, sink) = recording_sink();
        bridge.install(sink);

        bridge.notify(true);
        bridge.notify(false);

        assert_eq!(*seen.lock().unwrap(), vec![BRIDGE_SENTINEL.to_string(), String::new()]);
    }

    #[test]
    fn test_notify_without_sink() {
        let bridge = ExternalLoggerBridge::new();
        assert!(!bridge.is_installed());
        bridge.notify(true);
    }

    #[test]
    fn test_panicking_sink_is_contained() {
        let bridge = ExternalLoggerBridge::new();
        bridge.install(Arc::new(|_: &str| panic!("subsystem down")));

        bridge.notify(true);
        assert!(bridge.is_installed());
    }

    #[test]
    fn test_clear() {
        let bridge = ExternalLoggerBridge::new();
        let (seen, sink) = recording_sink();
        bridge.install(sink);
        bridge.clear();

        bridge.notify(true);
        assert!(seen.lock().unwrap().is_empty());
    }
}
