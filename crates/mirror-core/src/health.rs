//! Upstream reachability flag

use std::sync::atomic::{AtomicBool, Ordering};

/// Process-wide upstream online/offline flag.
///
/// The health monitor is the only writer; the decision engine reads the
/// flag exactly once per request. Passed around explicitly as an `Arc`
/// so tests can substitute their own instance and multiple mirrors can
/// coexist in one process.
#[derive(Debug)]
pub struct UpstreamHealth {
    online: AtomicBool,
}

impl UpstreamHealth {
    pub fn new(online: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
        }
    }

    /// Whether the upstream is currently considered reachable.
    pub fn online(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }

    /// Flip the flag. Reserved for the health monitor.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::Relaxed);
    }
}

impl Default for UpstreamHealth {
    /// Assume reachable until the monitor says otherwise.
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_round_trip() {
        let health = UpstreamHealth::default();
        assert!(health.online());

        health.set_online(false);
        assert!(!health.online());

        health.set_online(true);
        assert!(health.online());
    }
}
