//! Reactor Ports
//!
//! Traits for everything the reactor talks to but does not own: the clock,
//! the price oracle and the three fungible-asset ledgers.
//! Adapters live in `reactor-clock` and `reactor-engine::infrastructure`.

mod clock;
mod error;
mod ledger;
mod oracle;

pub use clock::Clock;
pub use error::{OracleError, OracleResult, TransferError, TransferResult};
pub use ledger::{FungibleLedger, IssuedToken};
pub use oracle::{AppliedUpdate, PriceOracle, PriceUpdate};
