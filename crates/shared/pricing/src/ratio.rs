use log::trace;
use reactor_core::math::{mul_div, wad_div};
use reactor_core::{MathResult, PEG, ReserveHealth, Supplies, WAD, Wad};
use serde::{Deserialize, Serialize};

/// One consistent view of reserve, supplies and price
///
/// Every derived quantity (ratio, implied prices, health) is computed from
/// the same snapshot, never from values read at different times. `reserve`
/// is in 18 decimals; `price` is peg units per reserve unit, in WAD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveSnapshot {
    pub reserve: Wad,
    pub supplies: Supplies,
    pub target_ratio: Wad,
    pub price: Wad,
}

impl ReserveSnapshot {
    pub fn new(reserve: Wad, supplies: Supplies, target_ratio: Wad, price: Wad) -> Self {
        Self {
            reserve,
            supplies,
            target_ratio,
            price,
        }
    }

    /// Share of the reserve backing the stable token: `min(WAD, WAD / r*)`
    pub fn stable_share(&self) -> MathResult<Wad> {
        Ok(mul_div(WAD, WAD, self.target_ratio)?.min(WAD))
    }

    /// Reserve value of one stable token, in reserve units
    ///
    /// With no stable supply this is the peg expressed in reserve units.
    pub fn stable_price(&self) -> MathResult<Wad> {
        if self.supplies.stable == 0 {
            return wad_div(PEG, self.price);
        }
        mul_div(self.stable_share()?, self.reserve, self.supplies.stable)
    }

    /// Reserve value of one volatile token, in reserve units
    ///
    /// The volatile token owns whatever the stable share does not. With no
    /// volatile supply the price is one reserve unit.
    pub fn volatile_price(&self) -> MathResult<Wad> {
        if self.supplies.volatile == 0 {
            return Ok(WAD);
        }
        let residual = WAD - self.stable_share()?;
        mul_div(residual, self.reserve, self.supplies.volatile)
    }

    /// Reserve value in peg units over stable supply: `R * P / (S_n * PEG)`
    ///
    /// Zero for an empty reserve; `u128::MAX` when nothing is owed.
    pub fn reserve_ratio(&self) -> MathResult<Wad> {
        if self.reserve == 0 {
            return Ok(0);
        }
        if self.supplies.stable == 0 {
            return Ok(u128::MAX);
        }
        let ratio = mul_div(self.reserve, self.price, self.supplies.stable)?;
        trace!(
            "reserve_ratio R={} P={} S_n={} -> {}",
            self.reserve, self.price, self.supplies.stable, ratio
        );
        Ok(ratio)
    }

    /// Stable token price in peg units
    pub fn stable_price_in_peg(&self) -> MathResult<Wad> {
        mul_div(self.stable_price()?, self.price, WAD)
    }

    /// Volatile token price in peg units
    pub fn volatile_price_in_peg(&self) -> MathResult<Wad> {
        mul_div(self.volatile_price()?, self.price, WAD)
    }

    pub fn health(&self) -> MathResult<ReserveHealth> {
        Ok(ReserveHealth::classify(
            self.reserve_ratio()?,
            self.target_ratio,
        ))
    }
}
