//! Reactor Clock Infrastructure
//!
//! Two adapters for the [`Clock`] port:
//!
//! - [`SystemClock`]: wall time, for production
//! - [`ManualClock`]: frozen time that only moves when told to, for tests
//!   and the simulation harness
//!
//! ## Usage
//!
//! ```ignore
//! use reactor_clock::{Clock, ManualClock};
//! use chrono::Duration;
//!
//! let clock = ManualClock::starting_at(start);
//! clock.advance(Duration::seconds(12)); // one simulated block
//! let now = clock.now();
//! ```

mod manual;
mod system;

pub use manual::ManualClock;
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use reactor_ports::Clock;
