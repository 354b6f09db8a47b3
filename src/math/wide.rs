//! 256-bit intermediates for reserve arithmetic.
//!
//! Reserves and amounts are `u128`, so any product of two of them needs up
//! to 256 bits.  [`mul_div`] and [`product_cmp`] do that arithmetic in
//! [`U256`] and only narrow the final result.
//!
//! Every quotient names its rounding direction, and the direction always
//! favours the pool:
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | swap output, withdrawal payout, shares issued | [`Rounding::Down`] |
//! | swap input, asset required for a deposit, fee | [`Rounding::Up`] |

use core::cmp::Ordering;

use primitive_types::U256;

use crate::domain::{Amount, Rounding};
use crate::error::ExchangeError;

/// `a * b / denominator` with a 256-bit intermediate product.
///
/// # Errors
///
/// - [`ExchangeError::DivisionByZero`] if `denominator` is zero.
/// - [`ExchangeError::Overflow`] if the quotient does not fit in `u128`.
///
/// # Examples
///
/// ```
/// use exchange_amm::domain::Rounding;
/// use exchange_amm::math::mul_div;
///
/// // u128::MAX * 2 overflows u128 but the quotient fits.
/// assert_eq!(mul_div(u128::MAX, 2, 4, Rounding::Up).ok(), Some(u128::MAX / 2 + 1));
/// ```
pub fn mul_div(
    a: u128,
    b: u128,
    denominator: u128,
    rounding: Rounding,
) -> crate::error::Result<u128> {
    mul_div_wide(
        U256::from(a) * U256::from(b),
        U256::from(denominator),
        rounding,
    )
}

/// `numerator / denominator` for numerators already widened to 256 bits.
///
/// # Errors
///
/// Same as [`mul_div`].
pub fn mul_div_wide(
    numerator: U256,
    denominator: U256,
    rounding: Rounding,
) -> crate::error::Result<u128> {
    if denominator.is_zero() {
        return Err(ExchangeError::DivisionByZero);
    }
    let (quotient, remainder) = numerator.div_mod(denominator);
    let quotient = if rounding.is_up() && !remainder.is_zero() {
        quotient + U256::one()
    } else {
        quotient
    };
    narrow(quotient)
}

/// Converts back to `u128`, failing instead of truncating.
///
/// # Errors
///
/// Returns [`ExchangeError::Overflow`] if `value > u128::MAX`.
pub fn narrow(value: U256) -> crate::error::Result<u128> {
    if value.bits() > 128 {
        return Err(ExchangeError::Overflow("256-bit quotient does not fit in u128"));
    }
    Ok(value.low_u128())
}

/// Widens an amount.
#[must_use]
pub fn wide(amount: Amount) -> U256 {
    U256::from(amount.get())
}

/// Compares `a0 * a1` with `b0 * b1` without overflow.
#[must_use]
pub fn product_cmp(a0: Amount, a1: Amount, b0: Amount, b1: Amount) -> Ordering {
    (wide(a0) * wide(a1)).cmp(&(wide(b0) * wide(b1)))
}
