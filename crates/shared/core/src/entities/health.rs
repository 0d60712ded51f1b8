use serde::{Deserialize, Serialize};

use crate::math::WAD;
use crate::values::Wad;

/// Reserve ratio below which the stable token is under-collateralized (100%)
pub const CRITICAL_RESERVE_RATIO: Wad = WAD;

/// Collateralization band of the reactor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReserveHealth {
    /// At or above the target ratio
    Healthy,
    /// Fully backed but under target
    BelowTarget,
    /// Reserve value below stable supply value
    Critical,
}

impl ReserveHealth {
    /// Classify a reserve ratio against the critical and target thresholds
    pub fn classify(ratio: Wad, target_ratio: Wad) -> Self {
        if ratio >= target_ratio {
            Self::Healthy
        } else if ratio >= CRITICAL_RESERVE_RATIO {
            Self::BelowTarget
        } else {
            Self::Critical
        }
    }

    pub fn is_critical(&self) -> bool {
        matches!(self, Self::Critical)
    }
}

impl std::fmt::Display for ReserveHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Healthy => write!(f, "HEALTHY"),
            Self::BelowTarget => write!(f, "BELOW_TARGET"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}
