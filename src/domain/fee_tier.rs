//! Swap fee charged on the input side of a trade.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::basis_points::BPS_DENOMINATOR;
use super::{Amount, BasisPoints, Rounding};
use crate::error::ExchangeError;

/// The fee a pool retains from every swap input, in [`BasisPoints`].
///
/// The fee is applied multiplicatively before the curve:
/// `effective_input = input × (10 000 − bps) / 10 000`.  A pool's fee is
/// fixed when the pool is created.
///
/// # Examples
///
/// ```
/// use exchange_amm::domain::{BasisPoints, FeeTier};
///
/// let tier = FeeTier::default();
/// assert_eq!(tier, FeeTier::TIER_0_30_PERCENT);
/// assert_eq!(tier.retained_numerator(), 9_970);
/// assert!(FeeTier::new(BasisPoints::new(10_000)).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeTier(BasisPoints);

impl FeeTier {
    /// No fee.
    pub const ZERO: Self = Self(BasisPoints::ZERO);

    /// 0.30%, the classic 997/1000 exchange fee.
    pub const TIER_0_30_PERCENT: Self = Self(BasisPoints::new(30));

    /// 1.00%.
    pub const TIER_1_00_PERCENT: Self = Self(BasisPoints::new(100));

    /// Wraps arbitrary basis points.  Call [`validate`](Self::validate)
    /// before using the tier for pricing.
    #[must_use]
    pub const fn new(basis_points: BasisPoints) -> Self {
        Self(basis_points)
    }

    /// Returns the underlying basis points.
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// Fee denominator (`D`), 10 000.
    #[must_use]
    pub const fn denominator(&self) -> u128 {
        BPS_DENOMINATOR
    }

    /// `D − N`: the part of every input unit that reaches the curve.
    ///
    /// Saturates at zero for invalid tiers; [`validate`](Self::validate)
    /// rejects those before they are used.
    #[must_use]
    pub const fn retained_numerator(&self) -> u128 {
        BPS_DENOMINATOR.saturating_sub(self.0.get() as u128)
    }

    /// Fee portion of `amount_in`, rounded up in favour of the pool.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Overflow`] if the multiplication overflows.
    pub fn fee_on(&self, amount_in: Amount) -> crate::error::Result<Amount> {
        self.0.apply(amount_in, Rounding::owed_to_pool())
    }

    /// Checks that the fee leaves some input for the curve.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::InvalidFee`] for fees of 100% or more.
    pub fn validate(&self) -> crate::error::Result<()> {
        if u128::from(self.0.get()) >= BPS_DENOMINATOR {
            return Err(ExchangeError::InvalidFee("fee must be below 100%"));
        }
        Ok(())
    }
}

impl Default for FeeTier {
    fn default() -> Self {
        Self::TIER_0_30_PERCENT
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeTier({})", self.0)
    }
}
