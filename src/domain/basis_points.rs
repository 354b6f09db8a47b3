//! Basis-point representation for percentages.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Rounding};
use crate::math::mul_div;

/// 10 000 basis points = 100%.
pub(crate) const BPS_DENOMINATOR: u128 = 10_000;

/// A percentage in basis points (1 bp = 0.01%).
///
/// Any `u32` is representable; [`is_valid_percent`](Self::is_valid_percent)
/// tells whether the value is a meaningful percentage.
///
/// # Examples
///
/// ```
/// use exchange_amm::domain::{Amount, BasisPoints, Rounding};
///
/// let bp = BasisPoints::new(30);
/// assert_eq!(bp.apply(Amount::new(1_000), Rounding::Up).ok(), Some(Amount::new(3)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// 0%.
    pub const ZERO: Self = Self(0);

    /// 100%.
    pub const MAX_PERCENT: Self = Self(10_000);

    /// Wraps a raw basis-point count.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw count.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// `true` when the value lies in `0..=10_000`.
    #[must_use]
    pub const fn is_valid_percent(&self) -> bool {
        self.0 <= Self::MAX_PERCENT.0
    }

    /// Computes `amount × self / 10 000` with explicit rounding.
    ///
    /// The product is formed in 256 bits, so only a result above
    /// `u128::MAX` fails.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Overflow`](crate::error::ExchangeError::Overflow) if the result does not fit.
    pub fn apply(&self, amount: Amount, rounding: Rounding) -> crate::error::Result<Amount> {
        mul_div(amount.get(), u128::from(self.0), BPS_DENOMINATOR, rounding).map(Amount::new)
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
