//! Host UI surface used by container and dialog targets

use super::target::ContainerRef;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// How a modal notice ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeOutcome {
    /// The user dismissed the notice
    Dismissed,
    /// The caller-supplied timeout elapsed first
    TimedOut,
}

/// The host application's UI, as seen by the logger.
///
/// Implementations must be callable from any thread; a host that can only
/// touch its UI from one thread is expected to marshal the call itself.
pub trait UiHost: Send + Sync {
    /// Resolve a container reference to its canonical long form.
    ///
    /// Returns `None` when the reference does not name a live container.
    fn resolve_container(&self, reference: &str) -> Option<String>;

    /// Append text to a container.
    ///
    /// Returns `false` if the container no longer exists.
    fn append_to_container(&self, container: &ContainerRef, text: &str) -> bool;

    /// Present text as a modal notice, blocking until it is dismissed or
    /// `timeout` elapses.
    fn show_notice(&self, text: &str, timeout: Option<Duration>) -> NoticeOutcome;
}

/// In-memory host (for testing and headless use)
#[derive(Debug, Default)]
pub struct MemoryHost {
    /// Reference -> long-form reference
    aliases: Mutex<HashMap<String, String>>,

    /// Canonical container -> text content
    contents: Mutex<HashMap<String, String>>,

    /// Notices shown, in order
    notices: Mutex<Vec<String>>,
}

impl MemoryHost {
    /// Create an empty host
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a container reachable by `reference`, whose long form is `long_ref`
    pub fn add_container(&self, reference: impl Into<String>, long_ref: impl Into<String>) {
        let long_ref = long_ref.into();
        let canonical = ContainerRef::from_long_ref(&long_ref).canonical();

        if let Ok(mut aliases) = self.aliases.lock() {
            aliases.insert(reference.into(), long_ref.clone());
            aliases.insert(long_ref, canonical.clone());
        }
        if let Ok(mut contents) = self.contents.lock() {
            contents.entry(canonical).or_default();
        }
    }

    /// Delete a container; later appends report it missing
    pub fn remove_container(&self, reference: &str) {
        let canonical = self.canonical_for(reference);
        if let Ok(mut contents) = self.contents.lock() {
            contents.remove(&canonical);
        }
    }

    /// Current text of a container
    pub fn text(&self, reference: &str) -> Option<String> {
        let canonical = self.canonical_for(reference);
        self.contents
            .lock()
            .ok()
            .and_then(|contents| contents.get(&canonical).cloned())
    }

    /// All notices shown so far
    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }

    fn canonical_for(&self, reference: &str) -> String {
        let long_ref = self
            .resolve_container(reference)
            .unwrap_or_else(|| reference.to_string());
        ContainerRef::from_long_ref(&long_ref).canonical()
    }
}

impl UiHost for MemoryHost {
    fn resolve_container(&self, reference: &str) -> Option<String> {
        self.aliases
            .lock()
            .ok()
            .and_then(|aliases| aliases.get(reference).cloned())
    }

    fn append_to_container(&self, container: &ContainerRef, text: &str) -> bool {
        let Ok(mut contents) = self.contents.lock() else {
            return false;
        };

        match contents.get_mut(&container.canonical()) {
            Some(content) => {
                content.push_str(text);
                true
            },
            None => false,
        }
    }

    fn show_notice(&self, text: &str, _timeout: Option<Duration>) -> NoticeOutcome {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(text.to_string());
        }
        NoticeOutcome::Dismissed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_host_append() {
        let host = MemoryHost::new();
        host.add_container("field \"Log\"", "field id 5 of card id 2 of stack \"Main\"");

        let long_ref = host.resolve_container("field \"Log\"").unwrap();
        let container = ContainerRef::from_long_ref(&long_ref);

        assert!(host.append_to_container(&container, "one\n"));
        assert!(host.append_to_container(&container, "two\n"));
        assert_eq!(host.text("field \"Log\"").unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_memory_host_missing_container() {
        let host = MemoryHost::new();
        host.add_container("field \"Log\"", "field id 5 of stack \"Main\"");
        host.remove_container("field \"Log\"");

        let container = ContainerRef::from_long_ref("field id 5 of stack \"Main\"");
        assert!(!host.append_to_container(&container, "lost"));
        assert!(host.text("field \"Log\"").is_none());
    }

    #[test]
    fn test_memory_host_notices() {
        let host = MemoryHost::new();
        let outcome = host.show_notice("hello", Some(Duration::from_secs(1)));
        assert_eq!(outcome, NoticeOutcome::Dismissed);
        assert_eq!(host.notices(), vec!["hello".to_string()]);
    }
}
