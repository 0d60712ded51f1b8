mod config;
mod fee_curve;
mod health;
mod price;
mod supplies;

pub use config::{
    DEFAULT_MAX_PRICE_AGE_SECS, DEFAULT_TARGET_RESERVE_RATIO, FissionMode, ReactorConfig,
};
pub use fee_curve::FeeCurveParams;
pub use health::{CRITICAL_RESERVE_RATIO, ReserveHealth};
pub use price::PriceQuote;
pub use supplies::{Supplies, TokenKind};
