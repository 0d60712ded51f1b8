//! WAD fixed-point arithmetic
//!
//! Every ratio, fee rate and price in the reactor is a `u128` scaled by
//! [`WAD`]. Products are taken in 256-bit space so that `a * b` never
//! overflows before the division; only a quotient that does not fit back
//! into `u128` is an error. Rounding is floor unless the `_up` variant is
//! used explicitly.

use primitive_types::U256;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::values::Wad;

/// Fixed-point scale factor: 1.0 == 10^18
pub const WAD: Wad = 1_000_000_000_000_000_000;

/// One unit of the peg target, in WAD
pub const PEG: Wad = WAD;

/// Number of decimals implied by [`WAD`]
pub const WAD_DECIMALS: u8 = 18;

/// Largest exponent for which `10^k` fits in a `u128`
pub const MAX_POW10: u32 = 38;

/// Errors raised by the fixed-point primitives
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("Arithmetic overflow in {0}")]
    Overflow(&'static str),

    #[error("Division by zero in {0}")]
    DivisionByZero(&'static str),

    #[error("Negative value where an unsigned quantity is required")]
    Negative,
}

pub type MathResult<T> = std::result::Result<T, MathError>;

fn narrow(value: U256, op: &'static str) -> MathResult<u128> {
    if value > U256::from(u128::MAX) {
        return Err(MathError::Overflow(op));
    }
    Ok(value.low_u128())
}

/// `floor(a * b / denom)` with a 256-bit intermediate
pub fn mul_div(a: u128, b: u128, denom: u128) -> MathResult<u128> {
    if denom == 0 {
        return Err(MathError::DivisionByZero("mul_div"));
    }
    let product = U256::from(a) * U256::from(b);
    narrow(product / U256::from(denom), "mul_div")
}

/// `ceil(a * b / denom)` with a 256-bit intermediate
pub fn mul_div_up(a: u128, b: u128, denom: u128) -> MathResult<u128> {
    if denom == 0 {
        return Err(MathError::DivisionByZero("mul_div_up"));
    }
    let product = U256::from(a) * U256::from(b);
    let denom = U256::from(denom);
    let mut quotient = product / denom;
    if !(product % denom).is_zero() {
        quotient += U256::one();
    }
    narrow(quotient, "mul_div_up")
}

/// `a * b / WAD`, floor
pub fn wad_mul(a: Wad, b: Wad) -> MathResult<Wad> {
    mul_div(a, b, WAD)
}

/// `a * WAD / b`, floor
pub fn wad_div(a: Wad, b: Wad) -> MathResult<Wad> {
    mul_div(a, WAD, b)
}

/// `base^exponent` at WAD scale using exponentiation by squaring
///
/// Runs in `O(log exponent)` multiplications. Each squaring floors, so the
/// result for `base < WAD` is a lower bound of the exact power.
pub fn rpow(base: Wad, exponent: u64) -> MathResult<Wad> {
    let mut result = if exponent & 1 == 1 { base } else { WAD };
    let mut x = base;
    let mut n = exponent >> 1;

    while n > 0 {
        x = mul_div(x, x, WAD)?;
        if n & 1 == 1 {
            result = mul_div(result, x, WAD)?;
        }
        n >>= 1;
    }

    Ok(result)
}

/// `10^exponent` as a `u128`
pub fn pow10(exponent: u32) -> MathResult<u128> {
    10u128
        .checked_pow(exponent)
        .ok_or(MathError::Overflow("pow10"))
}

/// Convert a decimal (e.g. `0.003`) into its WAD representation, truncating
/// digits beyond the 18th decimal place
pub fn wad_from_decimal(value: Decimal) -> MathResult<Wad> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(MathError::Negative);
    }

    let mantissa = value.mantissa().unsigned_abs();
    let scale = value.scale();
    let wad_scale = u32::from(WAD_DECIMALS);

    if scale <= wad_scale {
        mantissa
            .checked_mul(pow10(wad_scale - scale)?)
            .ok_or(MathError::Overflow("wad_from_decimal"))
    } else {
        Ok(mantissa / pow10(scale - wad_scale)?)
    }
}

/// Convert a WAD back to a decimal; `None` if it exceeds decimal precision
pub fn wad_to_decimal(value: Wad) -> Option<Decimal> {
    let signed = i128::try_from(value).ok()?;
    Decimal::try_from_i128_with_scale(signed, u32::from(WAD_DECIMALS))
        .ok()
        .map(|d| d.normalize())
}

/// Human-readable rendering of a WAD for logs
pub fn fmt_wad(value: Wad) -> String {
    match wad_to_decimal(value) {
        Some(d) => d.to_string(),
        None => format!("{}e-18", value),
    }
}
