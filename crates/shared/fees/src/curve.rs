use reactor_core::math::mul_div;
use reactor_core::{FeeCurveParams, MathError, MathResult, SignedWad, WAD, Wad};
use serde::{Deserialize, Serialize};

/// Direction of a transmutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowDirection {
    /// Volatile into stable; absorbs surplus, increases the ledger
    ToStable,
    /// Stable into volatile; absorbs deficit, decreases the ledger
    ToVolatile,
}

impl FlowDirection {
    /// Part of the ledger leaning the same way as this flow
    pub fn one_sided(&self, decayed_volume: SignedWad) -> Wad {
        match self {
            FlowDirection::ToStable if decayed_volume > 0 => decayed_volume.unsigned_abs(),
            FlowDirection::ToVolatile if decayed_volume < 0 => decayed_volume.unsigned_abs(),
            _ => 0,
        }
    }
}

impl std::fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlowDirection::ToStable => write!(f, "TO_STABLE"),
            FlowDirection::ToVolatile => write!(f, "TO_VOLATILE"),
        }
    }
}

/// Fee rate in `[0, WAD]`: `phi0 + phi1 * one_sided(v) / R`, clamped
///
/// A zero curve is exactly zero regardless of the reserve. Otherwise an empty
/// reserve charges the maximum.
pub fn fee_rate(
    params: &FeeCurveParams,
    decayed_volume: SignedWad,
    reserve: Wad,
    direction: FlowDirection,
) -> MathResult<Wad> {
    if params.is_zero_fee() {
        return Ok(0);
    }
    if reserve == 0 {
        return Ok(WAD);
    }

    let pressure = direction.one_sided(decayed_volume);
    // A quotient beyond u128 is far past the clamp
    let dynamic = match mul_div(params.phi1, pressure, reserve) {
        Ok(value) => value,
        Err(MathError::Overflow(_)) => WAD,
        Err(e) => return Err(e),
    };

    Ok(params.phi0.saturating_add(dynamic).min(WAD))
}

/// Split `gross` into `(fee, net)` at `rate`; the fee floors
pub fn apply_fee(gross: Wad, rate: Wad) -> MathResult<(Wad, Wad)> {
    let fee = mul_div(gross, rate, WAD)?;
    Ok((fee, gross - fee))
}
