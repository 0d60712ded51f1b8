//! Reactor Fees
//!
//! Dynamic transmutation fee: a signed, exponentially decaying ledger of net
//! conversion flow ([`DecayLedger`]) feeds a fee curve that charges more
//! for flow in the direction the ledger is already leaning.

mod curve;
mod decay;

pub use curve::{FlowDirection, apply_fee, fee_rate};
pub use decay::DecayLedger;
