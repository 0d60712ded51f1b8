use reactor_core::{Amount, FeedId, PriceQuote, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::{OracleError, OracleResult};

/// Signed price update submitted alongside an operation
///
/// The payload is opaque to the reactor; only the oracle decodes and
/// verifies it. `payment` is what the caller attached to cover the update fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceUpdate {
    pub payload: Vec<u8>,
    pub payment: Amount,
}

impl PriceUpdate {
    pub fn new(payload: Vec<u8>, payment: Amount) -> Self {
        Self { payload, payment }
    }
}

/// What an applied update changed, enough for the oracle to undo it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedUpdate {
    pub feed: FeedId,
    /// Quote stored before the update; `None` if the feed had none
    pub previous: Option<PriceQuote>,
    /// Fee taken for the update
    pub fee: Amount,
}

/// Port for a pull-style price oracle
pub trait PriceOracle: Send + Sync {
    /// Latest quote regardless of age
    fn read_unsafe(&self, feed: &FeedId) -> OracleResult<PriceQuote>;

    /// Latest quote, rejected when older than `max_age_secs` at `now`
    fn read_fresh(
        &self,
        feed: &FeedId,
        max_age_secs: u64,
        now: Timestamp,
    ) -> OracleResult<PriceQuote> {
        let quote = self.read_unsafe(feed)?;
        if !quote.is_fresh(now, max_age_secs) {
            return Err(OracleError::StalePrice {
                feed: feed.clone(),
                age_secs: quote.age_secs(now),
                max_age_secs,
            });
        }
        Ok(quote)
    }

    /// Fee required to apply `update`
    fn update_fee(&self, update: &PriceUpdate) -> OracleResult<Amount>;

    /// Verify and store `update`, having been paid `paid`
    fn apply_update(&self, update: &PriceUpdate, paid: Amount) -> OracleResult<AppliedUpdate>;

    /// Restore the quote replaced by `applied` and refund its fee
    fn revert_update(&self, applied: &AppliedUpdate) -> OracleResult<()>;
}
