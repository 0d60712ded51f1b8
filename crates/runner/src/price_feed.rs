//! Price Feed - Random-walk oracle prices for the simulation
//!
//! Each tick moves the price by up to `volatility` in either direction and
//! publishes the result as a JSON update payload, the same shape a keeper
//! would submit to the reactor.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reactor_core::{Amount, FeedId, PriceQuote, Timestamp};
use reactor_engine::PricePayload;
use reactor_ports::PriceUpdate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RunnerError};

/// Decimal places kept in published prices
const PRICE_DECIMALS: u32 = 8;

/// Configuration for the price random walk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceFeedConfig {
    /// Starting price of the reserve asset in peg units
    pub initial_price: Decimal,
    /// Largest relative move per tick (0.01 = 1%)
    pub volatility: Decimal,
    /// The walk never goes below this price
    pub floor_price: Decimal,
}

impl Default for PriceFeedConfig {
    fn default() -> Self {
        Self {
            initial_price: dec!(2000),
            volatility: dec!(0.01),
            floor_price: dec!(0.01),
        }
    }
}

/// Generates oracle prices
pub struct PriceFeedSimulator {
    feed: FeedId,
    price: Decimal,
    config: PriceFeedConfig,
    rng: StdRng,
}

impl PriceFeedSimulator {
    /// Create with a specific seed for reproducible simulations
    pub fn with_seed(feed: FeedId, config: PriceFeedConfig, seed: u64) -> Self {
        Self {
            feed,
            price: config.initial_price,
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn feed(&self) -> &FeedId {
        &self.feed
    }

    /// Current price in peg units
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Current price as an oracle quote published at `now`
    pub fn quote(&self, now: Timestamp) -> Result<PriceQuote> {
        to_quote(self.price, now)
    }

    /// Advance the walk one step and return the new price
    pub fn step(&mut self) -> Decimal {
        let draw: f64 = self.rng.gen_range(-1.0..1.0);
        let change = Decimal::from_f64_retain(draw).unwrap_or_default() * self.config.volatility;
        let next = (self.price * (Decimal::ONE + change)).round_dp(PRICE_DECIMALS);
        self.price = next.max(self.config.floor_price);
        self.price
    }

    /// Step the walk and wrap the new price as an update paying `payment`
    pub fn next_update(&mut self, now: Timestamp, payment: Amount) -> Result<PriceUpdate> {
        self.step();
        let quote = self.quote(now)?;
        Ok(PricePayload::new(self.feed.clone(), quote).into_update(payment)?)
    }
}

/// Express a positive decimal as `(mantissa, exponent)`
pub fn to_quote(price: Decimal, now: Timestamp) -> Result<PriceQuote> {
    if price <= Decimal::ZERO {
        return Err(RunnerError::Settings(format!(
            "price must be positive, got {}",
            price
        )));
    }
    let price = price.normalize();
    let mantissa = i64::try_from(price.mantissa())
        .map_err(|_| RunnerError::Settings(format!("price {} has too many digits", price)))?;
    let exponent = -i32::try_from(price.scale())
        .map_err(|_| RunnerError::Settings(format!("price {} has too many digits", price)))?;
    Ok(PriceQuote::new(mantissa, exponent, now))
}
