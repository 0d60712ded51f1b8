use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::math::WAD;
use crate::values::Wad;

/// Dynamic transmutation fee parameters
///
/// Replaced wholesale by the treasury; there are no partial updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeCurveParams {
    /// Base fee rate, in WAD
    pub phi0: Wad,

    /// Sensitivity to one-sided decayed flow relative to the reserve, in WAD
    pub phi1: Wad,

    /// Multiplicative per-second decay of the flow ledger (WAD = no decay)
    pub decay_per_second: Wad,
}

impl Default for FeeCurveParams {
    fn default() -> Self {
        Self {
            phi0: 0,
            phi1: 0,
            decay_per_second: WAD,
        }
    }
}

impl FeeCurveParams {
    pub fn new(phi0: Wad, phi1: Wad, decay_per_second: Wad) -> Self {
        Self {
            phi0,
            phi1,
            decay_per_second,
        }
    }

    /// True when both coefficients are zero and every rate is exactly zero
    pub fn is_zero_fee(&self) -> bool {
        self.phi0 == 0 && self.phi1 == 0
    }

    /// True when the ledger never decays
    pub fn is_decay_disabled(&self) -> bool {
        self.decay_per_second == WAD
    }

    /// Every parameter must lie in `[0, WAD]`
    pub fn validate(&self) -> ConfigResult<()> {
        let params = [
            ("phi0", self.phi0),
            ("phi1", self.phi1),
            ("decay_per_second", self.decay_per_second),
        ];
        for (name, value) in params {
            if value > WAD {
                return Err(ConfigError::CurveParamTooHigh { name, value });
            }
        }
        Ok(())
    }
}
