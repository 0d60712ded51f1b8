use std::sync::Arc;

use chrono::{Duration, Utc};
use parking_lot::RwLock;
use reactor_core::Timestamp;
use reactor_ports::Clock;

/// Clock that stands still until advanced or set
///
/// Cheap to clone; clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Arc<RwLock<Timestamp>>,
}

impl ManualClock {
    /// Start at the current wall time
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    /// Start at a fixed time
    pub fn starting_at(time: Timestamp) -> Self {
        Self {
            current: Arc::new(RwLock::new(time)),
        }
    }

    /// Move time forward (or backward, for a negative duration)
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.write();
        *current += duration;
    }

    /// Advance by whole seconds
    pub fn advance_secs(&self, secs: i64) {
        self.advance(Duration::seconds(secs));
    }

    /// Jump to `time`
    ///
    /// Moving backwards is allowed; consumers treat a time earlier than one
    /// they already saw as "no time elapsed".
    pub fn set(&self, time: Timestamp) {
        *self.current.write() = time;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.current.read()
    }

    fn name(&self) -> &str {
        "ManualClock"
    }
}
