use alloy::primitives::U256;
use fastnum::{
    bint,
    decimal::{Context, RoundingMode, UnsignedDecimal},
};

use crate::error::{Error, Result};

/// Number of decimals order amounts, prices and fees are expressed with
/// on the exchange contracts, regardless of the token decimals.
pub const ORDER_DECIMALS: u8 = 8;

/// Fixed-point to decimal converter.
#[derive(Clone, Copy, Debug, Default)]
pub struct Converter {
    decimals: u8,
}

impl Converter {
    pub fn new(decimals: u8) -> Self {
        Self { decimals }
    }

    /// Converter for order quantities, see [`ORDER_DECIMALS`].
    pub fn orders() -> Self {
        Self::new(ORDER_DECIMALS)
    }

    pub fn from_unsigned<const N: usize>(&self, value: U256) -> Option<UnsignedDecimal<N>> {
        let unscaled = bint::UInt::<N>::from_le_slice(value.as_le_slice())?;
        Some(UnsignedDecimal::<N>::from_parts(
            unscaled,
            -(self.decimals as i32),
            Context::default().with_rounding_mode(RoundingMode::Floor),
        ))
    }

    /// Fixed-point units of `value`.
    ///
    /// Fails when `value` is not a whole number of units, the result is
    /// never rounded.
    pub fn to_unsigned<const N: usize>(
        &self,
        field: &'static str,
        value: UnsignedDecimal<N>,
    ) -> Result<U256> {
        let digits = U256::from_le_slice(value.digits().to_radix_le(256).as_slice());
        let shift = self.decimals as i32 - value.fractional_digits_count() as i32;
        if shift >= 0 {
            return pow10(shift.unsigned_abs())
                .and_then(|scale| digits.checked_mul(scale))
                .ok_or_else(|| overflow(field, 256, U256::MAX));
        }
        let scale = pow10(shift.unsigned_abs()).unwrap_or(U256::MAX);
        if digits % scale != U256::ZERO {
            return Err(Error::Precision {
                field,
                decimals: self.decimals,
            });
        }
        Ok(digits / scale)
    }
}

fn pow10(exp: u32) -> Option<U256> {
    U256::from(10u8).checked_pow(U256::from(exp))
}

/// Narrows `value` to 32 bits, rejecting instead of truncating.
pub fn narrow_u32(field: &'static str, value: U256) -> Result<u32> {
    u32::try_from(value).map_err(|_| overflow(field, 32, value))
}

/// Narrows `value` to 64 bits, rejecting instead of truncating.
pub fn narrow_u64(field: &'static str, value: U256) -> Result<u64> {
    u64::try_from(value).map_err(|_| overflow(field, 64, value))
}

/// Narrows `value` to 128 bits, rejecting instead of truncating.
pub fn narrow_u128(field: &'static str, value: U256) -> Result<u128> {
    u128::try_from(value).map_err(|_| overflow(field, 128, value))
}

fn overflow(field: &'static str, bits: u32, value: U256) -> Error {
    Error::Overflow { field, bits, value }
}
