use std::sync::Arc;

use log::debug;
use reactor_core::math::{MAX_POW10, mul_div, pow10};
use reactor_core::{FeedId, MathError, PriceQuote, Timestamp, WAD, Wad};
use reactor_ports::PriceOracle;

use crate::error::{PricingError, PricingResult};

/// Scale a raw quote to WAD: `mantissa * 10^exponent * WAD`, floored
///
/// Rejects non-positive mantissas and prices that floor to zero.
pub fn normalize_quote(quote: &PriceQuote) -> PricingResult<Wad> {
    if quote.mantissa <= 0 {
        return Err(PricingError::InvalidPrice(format!(
            "non-positive mantissa {}",
            quote.mantissa
        )));
    }
    let mantissa = quote.mantissa.unsigned_abs() as u128;

    let price = if quote.exponent >= 0 {
        let scale = pow10(quote.exponent.unsigned_abs())?;
        mul_div(mantissa, WAD, 1)?
            .checked_mul(scale)
            .ok_or(MathError::Overflow("normalize_quote"))?
    } else {
        let k = quote.exponent.unsigned_abs();
        if k > MAX_POW10 {
            return Err(PricingError::InvalidPrice(format!(
                "exponent {} out of range",
                quote.exponent
            )));
        }
        mul_div(mantissa, WAD, pow10(k)?)?
    };

    if price == 0 {
        return Err(PricingError::InvalidPrice(format!(
            "{}e{} rounds to zero",
            quote.mantissa, quote.exponent
        )));
    }

    Ok(price)
}

/// Reads one oracle feed and normalizes the result
///
/// `fresh_price` is for anything that moves value; `unsafe_price` skips the
/// staleness check and is only for informational views and quotes.
#[derive(Clone)]
pub struct PriceNormalizer {
    oracle: Arc<dyn PriceOracle>,
    feed: FeedId,
    max_age_secs: u64,
}

impl PriceNormalizer {
    pub fn new(oracle: Arc<dyn PriceOracle>, feed: FeedId, max_age_secs: u64) -> Self {
        Self {
            oracle,
            feed,
            max_age_secs,
        }
    }

    pub fn feed(&self) -> &FeedId {
        &self.feed
    }

    pub fn max_age_secs(&self) -> u64 {
        self.max_age_secs
    }

    pub fn oracle(&self) -> &Arc<dyn PriceOracle> {
        &self.oracle
    }

    /// Latest price in WAD, rejected when older than the configured maximum age
    pub fn fresh_price(&self, now: Timestamp) -> PricingResult<Wad> {
        let quote = self.oracle.read_fresh(&self.feed, self.max_age_secs, now)?;
        let price = normalize_quote(&quote)?;
        debug!(
            "Fresh price {}: {}e{} -> {} (age {}s)",
            self.feed,
            quote.mantissa,
            quote.exponent,
            price,
            quote.age_secs(now)
        );
        Ok(price)
    }

    /// Latest price in WAD regardless of age
    pub fn unsafe_price(&self) -> PricingResult<Wad> {
        let quote = self.oracle.read_unsafe(&self.feed)?;
        normalize_quote(&quote)
    }
}

impl std::fmt::Debug for PriceNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceNormalizer")
            .field("feed", &self.feed)
            .field("max_age_secs", &self.max_age_secs)
            .finish()
    }
}
