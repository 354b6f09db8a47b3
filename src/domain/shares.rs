//! Liquidity-share units.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Fungible units of proportional ownership in one pool.
///
/// Distinct from [`Amount`](super::Amount) because shares measure a claim on *both*
/// reserves rather than a quantity of either asset.  The first deposit
/// into an empty pool issues one share per base-currency unit; later
/// deposits issue shares pro rata to the base reserve.
///
/// # Examples
///
/// ```
/// use exchange_amm::domain::Shares;
///
/// let held = Shares::new(5);
/// assert_eq!(held.checked_sub(&Shares::new(2)), Some(Shares::new(3)));
/// assert_eq!(held.checked_sub(&Shares::new(6)), None);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Shares(u128);

impl Shares {
    /// No shares.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw `u128`.
    #[must_use]
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if there are no shares.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. `None` on overflow.
    #[must_use]
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Checked subtraction. `None` on underflow.
    #[must_use]
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl fmt::Display for Shares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
