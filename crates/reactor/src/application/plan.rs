//! Pure planning for every operation
//!
//! Operations and quotes share these functions. Nothing here talks to a
//! collaborator; inputs are one [`ReserveSnapshot`] plus the call arguments.

use log::debug;
use reactor_core::math::{mul_div, mul_div_up};
use reactor_core::{Amount, FeeCurveParams, FissionMode, ReactorConfig, SignedWad, WAD};
use reactor_fees::{FlowDirection, apply_fee, fee_rate};
use reactor_pricing::{ReserveScale, ReserveSnapshot};

use crate::error::{ReactorError, Result};
use crate::model::{FissionQuote, FusionQuote, TransmuteQuote};

/// Split `amount` raw reserve units into fee, stable and volatile outputs
pub fn plan_fission(
    config: &ReactorConfig,
    snapshot: &ReserveSnapshot,
    scale: &ReserveScale,
    amount: Amount,
) -> Result<FissionQuote> {
    if amount == 0 {
        return Err(ReactorError::InvalidArgument(
            "fission amount must be positive".to_string(),
        ));
    }

    let fee = mul_div(amount, config.fission_fee, WAD)?;
    let net = amount - fee;
    let net_wad = scale.to_wad(net)?;

    let (stable_out, volatile_out) = match config.fission_mode {
        FissionMode::TargetRatio => {
            let stable = mul_div(net_wad, snapshot.price, config.target_reserve_ratio)?;
            let volatile = net_wad - mul_div(net_wad, WAD, config.target_reserve_ratio)?;
            (stable, volatile)
        }
        FissionMode::RatioPreserving => {
            let supplies = snapshot.supplies;
            if !supplies.both_outstanding() {
                (net_wad, net_wad)
            } else if snapshot.reserve == 0 {
                return Err(ReactorError::EmptyReserve);
            } else {
                (
                    mul_div(net_wad, supplies.stable, snapshot.reserve)?,
                    mul_div(net_wad, supplies.volatile, snapshot.reserve)?,
                )
            }
        }
    };

    if stable_out == 0 && volatile_out == 0 {
        return Err(ReactorError::InvalidArgument(format!(
            "fission of {} mints nothing",
            amount
        )));
    }

    debug!(
        "Planned fission: in={} fee={} stable_out={} volatile_out={} ({:?})",
        amount, fee, stable_out, volatile_out, config.fission_mode
    );

    Ok(FissionQuote {
        reserve_in: amount,
        fee,
        net,
        stable_out,
        volatile_out,
    })
}

/// Proportional burns for redeeming `amount` raw reserve units
///
/// Burns round up so the redeemer never gets reserve for free.
pub fn plan_fusion(
    config: &ReactorConfig,
    snapshot: &ReserveSnapshot,
    scale: &ReserveScale,
    amount: Amount,
) -> Result<FusionQuote> {
    if amount == 0 {
        return Err(ReactorError::InvalidArgument(
            "fusion amount must be positive".to_string(),
        ));
    }
    let supplies = snapshot.supplies;
    if !supplies.both_outstanding() {
        return Err(ReactorError::InsufficientSupply(format!(
            "stable={} volatile={}",
            supplies.stable, supplies.volatile
        )));
    }
    if snapshot.reserve == 0 {
        return Err(ReactorError::EmptyReserve);
    }

    let amount_wad = scale.to_wad(amount)?;
    if amount_wad > snapshot.reserve {
        return Err(ReactorError::InvalidArgument(format!(
            "fusion of {} exceeds reserve",
            amount
        )));
    }

    let stable_burn = mul_div_up(amount_wad, supplies.stable, snapshot.reserve)?;
    let volatile_burn = mul_div_up(amount_wad, supplies.volatile, snapshot.reserve)?;
    let fee = mul_div(amount, config.fusion_fee, WAD)?;

    debug!(
        "Planned fusion: amount={} stable_burn={} volatile_burn={} fee={}",
        amount, stable_burn, volatile_burn, fee
    );

    Ok(FusionQuote {
        reserve_amount: amount,
        stable_burn,
        volatile_burn,
        fee,
        reserve_out: amount - fee,
    })
}

/// Convert `amount_in` of one issued token into the other
///
/// `decayed_volume` must already be advanced to the call's timestamp and must
/// not yet include this call's flow.
pub fn plan_transmute(
    params: &FeeCurveParams,
    decayed_volume: SignedWad,
    snapshot: &ReserveSnapshot,
    direction: FlowDirection,
    amount_in: Amount,
) -> Result<TransmuteQuote> {
    if amount_in == 0 {
        return Err(ReactorError::InvalidArgument(
            "transmute amount must be positive".to_string(),
        ));
    }
    if snapshot.reserve == 0 {
        return Err(ReactorError::EmptyReserve);
    }

    let (source_supply, price_in, price_out) = match direction {
        FlowDirection::ToStable => (
            snapshot.supplies.volatile,
            snapshot.volatile_price()?,
            snapshot.stable_price()?,
        ),
        FlowDirection::ToVolatile => (
            snapshot.supplies.stable,
            snapshot.stable_price()?,
            snapshot.volatile_price()?,
        ),
    };

    if amount_in > source_supply {
        return Err(ReactorError::InsufficientSupply(format!(
            "input {} exceeds supply {}",
            amount_in, source_supply
        )));
    }
    if price_in == 0 || price_out == 0 {
        return Err(ReactorError::InvalidArgument(format!(
            "implied price is zero (in={} out={})",
            price_in, price_out
        )));
    }

    let gross_value = mul_div(amount_in, price_in, WAD)?;
    let rate = fee_rate(params, decayed_volume, snapshot.reserve, direction)?;
    let (fee_value, net_value) = apply_fee(gross_value, rate)?;
    let amount_out = mul_div(net_value, WAD, price_out)?;

    if amount_out == 0 {
        return Err(ReactorError::InvalidArgument(format!(
            "transmuting {} yields nothing",
            amount_in
        )));
    }

    debug!(
        "Planned transmute {}: in={} gross={} rate={} out={}",
        direction, amount_in, gross_value, rate, amount_out
    );

    Ok(TransmuteQuote {
        direction,
        amount_in,
        gross_value,
        fee_rate: rate,
        fee_value,
        net_value,
        amount_out,
    })
}
