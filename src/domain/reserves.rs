//! Read-only snapshot of a pool's reserves.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Shares};

/// Base reserve, asset reserve and outstanding share supply at one instant.
///
/// Returned by `current_reserves` and stored in persisted pool records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Reserves {
    /// Base currency held by the pool.
    pub base: Amount,
    /// Paired asset held by the pool.
    pub asset: Amount,
    /// Outstanding liquidity shares.
    pub total_shares: Shares,
}

impl Reserves {
    /// The empty pool.
    pub const EMPTY: Self = Self {
        base: Amount::ZERO,
        asset: Amount::ZERO,
        total_shares: Shares::ZERO,
    };

    /// Builds a snapshot.
    #[must_use]
    pub const fn new(base: Amount, asset: Amount, total_shares: Shares) -> Self {
        Self {
            base,
            asset,
            total_shares,
        }
    }

    /// `true` when nothing has been deposited (or everything withdrawn).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.base.is_zero() && self.asset.is_zero() && self.total_shares.is_zero()
    }
}

impl fmt::Display for Reserves {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reserves(base={}, asset={}, shares={})",
            self.base, self.asset, self.total_shares
        )
    }
}
