//! Suspend / resume gate

use std::sync::atomic::{AtomicBool, Ordering};

/// A mute switch for all logging that leaves configuration untouched
#[derive(Debug, Default)]
pub struct SuspendGate {
    suspended: AtomicBool,
}

impl SuspendGate {
    /// Create an open gate
    pub fn new() -> Self {
        Self::default()
    }

    /// Mute logging
    pub fn suspend(&self) {
        self.suspended.store(true, Ordering::SeqCst);
    }

    /// Unmute logging
    pub fn resume(&self) {
        self.suspended.store(false, Ordering::SeqCst);
    }

    /// Check if logging is muted
    pub fn is_suspended(&self) -> bool {
        self.suspended.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_toggles() {
        let gate = SuspendGate::new();
        assert!(!gate.is_suspended());

        gate.suspend();
        gate.suspend();
        assert!(gate.is_suspended());

        gate.resume();
        assert!(!gate.is_suspended());
    }
}
