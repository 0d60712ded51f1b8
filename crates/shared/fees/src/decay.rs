use chrono::Duration;
use log::trace;
use reactor_core::math::{mul_div, rpow};
use reactor_core::{MathError, MathResult, SignedWad, Timestamp, WAD, Wad};
use serde::{Deserialize, Serialize};

use crate::curve::FlowDirection;

/// Signed accumulator of net transmutation flow, in 18-decimal reserve units
///
/// Positive values mean recent flow went volatile to stable. The value is
/// only meaningful after [`DecayLedger::advance`] has brought it to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecayLedger {
    decayed_volume: SignedWad,
    last_update: Timestamp,
}

impl DecayLedger {
    pub fn new(now: Timestamp) -> Self {
        Self {
            decayed_volume: 0,
            last_update: now,
        }
    }

    /// Current value as of the last advance
    pub fn decayed_volume(&self) -> SignedWad {
        self.decayed_volume
    }

    pub fn last_update(&self) -> Timestamp {
        self.last_update
    }

    /// Bring the ledger to `now`, scaling the volume by `decay^Δt`
    ///
    /// Whole elapsed seconds only. `Δt <= 0` leaves the ledger untouched, so
    /// a clock that steps backwards never moves it. A decay factor of `WAD`
    /// only moves the timestamp.
    pub fn advance(&mut self, now: Timestamp, decay_per_second: Wad) -> MathResult<()> {
        let elapsed = (now - self.last_update).num_seconds();
        if elapsed <= 0 {
            return Ok(());
        }

        if decay_per_second != WAD && self.decayed_volume != 0 {
            let factor = rpow(decay_per_second, elapsed.unsigned_abs())?;
            let magnitude = mul_div(self.decayed_volume.unsigned_abs(), factor, WAD)?;
            let before = self.decayed_volume;
            self.decayed_volume = if before < 0 {
                0i128.checked_sub_unsigned(magnitude)
            } else {
                0i128.checked_add_unsigned(magnitude)
            }
            .ok_or(MathError::Overflow("decay advance"))?;
            trace!(
                "Decay ledger {} -> {} over {}s",
                before, self.decayed_volume, elapsed
            );
        }

        self.last_update += Duration::seconds(elapsed);
        Ok(())
    }

    /// Value the ledger would hold at `now`, without mutating it
    pub fn projected(&self, now: Timestamp, decay_per_second: Wad) -> MathResult<SignedWad> {
        let mut ledger = *self;
        ledger.advance(now, decay_per_second)?;
        Ok(ledger.decayed_volume)
    }

    /// Record `gross` reserve value flowing in `direction`
    pub fn record(&mut self, direction: FlowDirection, gross: Wad) -> MathResult<()> {
        let delta = i128::try_from(gross).map_err(|_| MathError::Overflow("decay record"))?;
        let updated = match direction {
            FlowDirection::ToStable => self.decayed_volume.checked_add(delta),
            FlowDirection::ToVolatile => self.decayed_volume.checked_sub(delta),
        };
        self.decayed_volume = updated.ok_or(MathError::Overflow("decay record"))?;
        Ok(())
    }
}
