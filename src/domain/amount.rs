//! Raw base-currency or asset amount with checked arithmetic.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A raw amount in the smallest unit (wei or the asset's equivalent).
///
/// `Amount` never interprets decimals; every `u128` is a valid amount.
/// The same type measures both sides of a pool, base-currency reserves
/// and paired-asset reserves alike.
///
/// Arithmetic is checked: methods return `None` on overflow or underflow
/// and never wrap.  Products and quotients go through
/// [`mul_div`](crate::math::mul_div).
///
/// # Examples
///
/// ```
/// use exchange_amm::domain::Amount;
///
/// let deposit = Amount::new(5);
/// assert_eq!(deposit.checked_add(&Amount::new(3)), Some(Amount::new(8)));
/// assert_eq!(deposit.checked_sub(&Amount::new(6)), None);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Largest representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Wraps a raw `u128`.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` for the zero amount.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. `None` on overflow.
    #[must_use]
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Checked subtraction. `None` if `other > self`.
    #[must_use]
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
