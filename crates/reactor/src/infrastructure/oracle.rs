use std::collections::HashMap;

use log::{debug, info};
use parking_lot::RwLock;
use reactor_core::{Amount, FeedId, PriceQuote, Timestamp};
use reactor_ports::{AppliedUpdate, OracleError, OracleResult, PriceOracle, PriceUpdate};
use serde::{Deserialize, Serialize};

/// Wire form of a price update accepted by [`ManualOracle`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePayload {
    pub feed: FeedId,
    pub mantissa: i64,
    pub exponent: i32,
    pub publish_time: Timestamp,
}

impl PricePayload {
    pub fn new(feed: FeedId, quote: PriceQuote) -> Self {
        Self {
            feed,
            mantissa: quote.mantissa,
            exponent: quote.exponent,
            publish_time: quote.publish_time,
        }
    }

    pub fn quote(&self) -> PriceQuote {
        PriceQuote::new(self.mantissa, self.exponent, self.publish_time)
    }

    /// Encode as JSON and attach `payment`
    pub fn into_update(self, payment: Amount) -> OracleResult<PriceUpdate> {
        let payload =
            serde_json::to_vec(&self).map_err(|e| OracleError::InvalidPayload(e.to_string()))?;
        Ok(PriceUpdate::new(payload, payment))
    }

    pub fn decode(update: &PriceUpdate) -> OracleResult<Self> {
        serde_json::from_slice(&update.payload)
            .map_err(|e| OracleError::InvalidPayload(e.to_string()))
    }
}

/// Oracle whose prices are set directly or by JSON updates, for a flat fee
///
/// Like a pull oracle, an update older than the stored quote is accepted
/// but ignored.
#[derive(Debug, Default)]
pub struct ManualOracle {
    quotes: RwLock<HashMap<FeedId, PriceQuote>>,
    update_fee: Amount,
    fees_collected: RwLock<Amount>,
}

impl ManualOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_update_fee(mut self, fee: Amount) -> Self {
        self.update_fee = fee;
        self
    }

    /// Store `quote` for `feed` unconditionally
    pub fn set_price(&self, feed: &FeedId, quote: PriceQuote) {
        debug!(
            "Manual price for {}: {}e{} at {}",
            feed, quote.mantissa, quote.exponent, quote.publish_time
        );
        self.quotes.write().insert(feed.clone(), quote);
    }

    pub fn fees_collected(&self) -> Amount {
        *self.fees_collected.read()
    }
}

impl PriceOracle for ManualOracle {
    fn read_unsafe(&self, feed: &FeedId) -> OracleResult<PriceQuote> {
        self.quotes
            .read()
            .get(feed)
            .copied()
            .ok_or_else(|| OracleError::FeedNotFound(feed.clone()))
    }

    fn update_fee(&self, _update: &PriceUpdate) -> OracleResult<Amount> {
        Ok(self.update_fee)
    }

    fn apply_update(&self, update: &PriceUpdate, paid: Amount) -> OracleResult<AppliedUpdate> {
        if paid < self.update_fee {
            return Err(OracleError::InsufficientFee {
                required: self.update_fee,
                paid,
            });
        }

        let payload = PricePayload::decode(update)?;
        let quote = payload.quote();
        let previous = {
            let mut quotes = self.quotes.write();
            let previous = quotes.get(&payload.feed).copied();
            match previous {
                Some(current) if current.publish_time >= quote.publish_time => {
                    debug!(
                        "Ignoring update for {} published at {} (have {})",
                        payload.feed, quote.publish_time, current.publish_time
                    );
                }
                _ => {
                    info!(
                        "Price update for {}: {}e{} at {}",
                        payload.feed, quote.mantissa, quote.exponent, quote.publish_time
                    );
                    quotes.insert(payload.feed.clone(), quote);
                }
            }
            previous
        };

        let mut collected = self.fees_collected.write();
        *collected = collected
            .checked_add(paid)
            .ok_or_else(|| OracleError::Rejected("fee counter overflow".to_string()))?;

        Ok(AppliedUpdate {
            feed: payload.feed,
            previous,
            fee: paid,
        })
    }

    fn revert_update(&self, applied: &AppliedUpdate) -> OracleResult<()> {
        let mut collected = self.fees_collected.write();
        let refunded = collected.checked_sub(applied.fee).ok_or_else(|| {
            OracleError::Rejected(format!(
                "refund of {} exceeds collected fees {}",
                applied.fee, *collected
            ))
        })?;

        let mut quotes = self.quotes.write();
        match applied.previous {
            Some(quote) => {
                quotes.insert(applied.feed.clone(), quote);
            }
            None => {
                quotes.remove(&applied.feed);
            }
        }
        *collected = refunded;

        debug!(
            "Reverted update for {}, refunded {}",
            applied.feed, applied.fee
        );
        Ok(())
    }
}
