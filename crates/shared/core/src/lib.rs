//! Reactor Core Domain
//!
//! Pure domain types for the two-token reserve reactor.
//! This crate contains no async, no I/O, and is 100% unit testable.
//!
//! - [`math`]: WAD fixed-point primitives (`mul_div`, `rpow`, decimal bridge)
//! - [`values`]: identifiers, amounts and timestamps
//! - [`entities`]: configuration, fee-curve parameters, oracle quotes, supplies

pub mod entities;
pub mod error;
pub mod math;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    FeeCurveParams, FissionMode, PriceQuote, ReactorConfig, ReserveHealth, Supplies, TokenKind,
};
pub use error::{ConfigError, ConfigResult};
pub use math::{MathError, MathResult, PEG, WAD};
pub use values::{AccountId, Amount, AssetId, FeedId, SignedWad, Timestamp, Wad};
