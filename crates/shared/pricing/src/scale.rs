use reactor_core::math::{WAD_DECIMALS, pow10};
use reactor_core::{Amount, ConfigError, MathError, MathResult, Wad};

/// Converts reserve amounts between their native decimals and 18 decimals
///
/// All reactor math runs on 18-decimal reserve values. Scaling up is exact;
/// scaling down floors, so the reactor never pays out more than it accounts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReserveScale {
    decimals: u8,
    factor: u128,
}

impl ReserveScale {
    pub fn new(decimals: u8) -> Result<Self, ConfigError> {
        if decimals > WAD_DECIMALS {
            return Err(ConfigError::UnsupportedDecimals(decimals));
        }
        let factor = pow10(u32::from(WAD_DECIMALS - decimals))
            .map_err(|_| ConfigError::UnsupportedDecimals(decimals))?;
        Ok(Self { decimals, factor })
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Raw reserve units to 18 decimals
    pub fn to_wad(&self, raw: Amount) -> MathResult<Wad> {
        raw.checked_mul(self.factor)
            .ok_or(MathError::Overflow("reserve scale up"))
    }

    /// 18-decimal value to raw reserve units, floored
    pub fn from_wad(&self, value: Wad) -> Amount {
        value / self.factor
    }
}
