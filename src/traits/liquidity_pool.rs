//! Liquidity provision on top of [`SwapPool`].
//!
//! # Share accounting
//!
//! `total_shares` changes only through
//! [`add_liquidity`](LiquidityPool::add_liquidity) and
//! [`remove_liquidity`](LiquidityPool::remove_liquidity), and always equals
//! the sum of every provider's balance:
//!
//! ```text
//! total_shares = Σ shares_of(owner)
//! ```
//!
//! Swaps never mint or burn shares; fees stay in the reserves and accrue to
//! every provider pro rata.

use super::SwapPool;
use crate::domain::{
    Address, Deposit, DepositRequest, Shares, TxContext, WithdrawRequest, Withdrawal,
};
use crate::error::ExchangeError;

/// A pool that issues proportional shares against deposits of both sides.
pub trait LiquidityPool: SwapPool {
    /// Deposits liquidity for `ctx.sender()`.
    ///
    /// On an empty pool the deposit sets the price and issues one share per
    /// base unit.  Otherwise the asset side is derived from the current
    /// price, rounded up.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::DeadlineExpired`] past the request deadline.
    /// - [`ExchangeError::ZeroAmount`] for a zero base amount, a zero asset
    ///   amount on an empty pool, or a deposit too small to mint a share.
    /// - [`ExchangeError::ExcessiveInputAmount`] if the asset required
    ///   exceeds the caller's maximum.
    /// - [`ExchangeError::SlippageExceeded`] if fewer shares than requested
    ///   would be issued.
    fn add_liquidity(
        &mut self,
        ctx: &TxContext,
        request: &DepositRequest,
    ) -> Result<Deposit, ExchangeError>;

    /// Burns shares owned by `ctx.sender()` for a pro-rata payout.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::DeadlineExpired`] past the request deadline.
    /// - [`ExchangeError::ZeroAmount`] if no shares are burned.
    /// - [`ExchangeError::InsufficientShares`] if the sender holds fewer.
    /// - [`ExchangeError::SlippageExceeded`] below either minimum payout.
    fn remove_liquidity(
        &mut self,
        ctx: &TxContext,
        request: &WithdrawRequest,
    ) -> Result<Withdrawal, ExchangeError>;

    /// Outstanding share supply.
    #[must_use]
    fn total_shares(&self) -> Shares;

    /// Shares held by `owner` (zero if none).
    #[must_use]
    fn shares_of(&self, owner: &Address) -> Shares;
}
