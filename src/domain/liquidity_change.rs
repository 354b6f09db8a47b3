//! Liquidity deposit and withdrawal requests, and their receipts.

use core::fmt;

use super::{Amount, Shares, Timestamp};

/// A request to add liquidity.
///
/// The caller fixes the base-currency side; the pool derives the asset side
/// from the current price (or, for an empty pool, takes
/// `max_asset_amount` verbatim as the initial price).
///
/// # Examples
///
/// ```
/// use exchange_amm::domain::{Amount, DepositRequest, Shares, Timestamp};
///
/// let req = DepositRequest::new(Amount::new(5), Amount::new(5), Timestamp::NEVER)
///     .with_min_shares(Shares::new(5));
/// assert_eq!(req.min_shares(), Shares::new(5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepositRequest {
    base_amount: Amount,
    max_asset_amount: Amount,
    min_shares: Shares,
    deadline: Timestamp,
}

impl DepositRequest {
    /// Deposits `base_amount`, paying at most `max_asset_amount` of the
    /// asset, before `deadline`.  No bound on shares issued.
    #[must_use]
    pub const fn new(base_amount: Amount, max_asset_amount: Amount, deadline: Timestamp) -> Self {
        Self {
            base_amount,
            max_asset_amount,
            min_shares: Shares::ZERO,
            deadline,
        }
    }

    /// Rejects the deposit if it would issue fewer than `min_shares`.
    #[must_use]
    pub const fn with_min_shares(mut self, min_shares: Shares) -> Self {
        self.min_shares = min_shares;
        self
    }

    /// Base currency deposited.
    pub const fn base_amount(&self) -> Amount {
        self.base_amount
    }

    /// Upper bound on the asset the pool may pull.
    pub const fn max_asset_amount(&self) -> Amount {
        self.max_asset_amount
    }

    /// Lower bound on shares issued.
    #[must_use]
    pub const fn min_shares(&self) -> Shares {
        self.min_shares
    }

    /// Deadline for execution.
    #[must_use]
    pub const fn deadline(&self) -> Timestamp {
        self.deadline
    }
}

/// A request to burn shares for a pro-rata slice of both reserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WithdrawRequest {
    shares: Shares,
    min_base_out: Amount,
    min_asset_out: Amount,
    deadline: Timestamp,
}

impl WithdrawRequest {
    /// Burns `shares`, requiring at least the given outputs, before
    /// `deadline`.
    #[must_use]
    pub const fn new(
        shares: Shares,
        min_base_out: Amount,
        min_asset_out: Amount,
        deadline: Timestamp,
    ) -> Self {
        Self {
            shares,
            min_base_out,
            min_asset_out,
            deadline,
        }
    }

    /// Shares to burn.
    #[must_use]
    pub const fn shares(&self) -> Shares {
        self.shares
    }

    /// Minimum base currency returned.
    pub const fn min_base_out(&self) -> Amount {
        self.min_base_out
    }

    /// Minimum asset returned.
    pub const fn min_asset_out(&self) -> Amount {
        self.min_asset_out
    }

    /// Deadline for execution.
    #[must_use]
    pub const fn deadline(&self) -> Timestamp {
        self.deadline
    }
}

/// What a deposit moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Deposit {
    /// Base currency credited to the pool.
    pub base_in: Amount,
    /// Asset credited to the pool.
    pub asset_in: Amount,
    /// Shares minted to the provider.
    pub shares_issued: Shares,
}

/// What a withdrawal moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Withdrawal {
    /// Base currency paid out.
    pub base_out: Amount,
    /// Asset paid out.
    pub asset_out: Amount,
    /// Shares burned from the provider.
    pub shares_burned: Shares,
}

impl fmt::Display for Deposit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Deposit(base={}, asset={}, shares={})",
            self.base_in, self.asset_in, self.shares_issued
        )
    }
}

impl fmt::Display for Withdrawal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Withdrawal(base={}, asset={}, shares={})",
            self.base_out, self.asset_out, self.shares_burned
        )
    }
}
