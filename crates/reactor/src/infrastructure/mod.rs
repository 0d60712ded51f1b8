//! In-memory adapters for the ledger and oracle ports

mod ledger;
mod oracle;

pub use ledger::InMemoryLedger;
pub use oracle::{ManualOracle, PricePayload};
