use reactor_core::Timestamp;

/// Port for time abstraction
///
/// The reactor never reads wall time directly. Staleness checks and the
/// decay ledger both take "now" from this port, so tests and simulations
/// can pin or step time explicitly.
pub trait Clock: Send + Sync {
    /// Current time according to this clock
    fn now(&self) -> Timestamp;

    /// Clock name for logs
    fn name(&self) -> &str {
        "Clock"
    }
}
