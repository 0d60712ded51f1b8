//! Reactor Pricing
//!
//! - [`PriceNormalizer`]: oracle quote `(mantissa, exponent, publish_time)`
//!   to a WAD price, with fresh and unsafe read variants
//! - [`ReserveSnapshot`]: reserve ratio and per-token implied prices derived
//!   from one consistent view of reserve, supplies and price
//! - [`ReserveScale`]: conversion between raw reserve units and 18 decimals

mod error;
mod normalizer;
mod ratio;
mod scale;

pub use error::{PricingError, PricingResult};
pub use normalizer::{PriceNormalizer, normalize_quote};
pub use ratio::ReserveSnapshot;
pub use scale::ReserveScale;
