//! Swap execution and quoting.
//!
//! [`SwapPool`] covers everything a trader needs from one pool: execute an
//! order, quote either side of a trade, and read the reserves the quote was
//! taken from.
//!
//! # Fee placement
//!
//! The fee is taken from the input before the curve is applied:
//!
//! ```text
//! effective_in = amount_in × (10_000 − fee_bps) / 10_000
//! amount_out   = reserve_out × effective_in / (reserve_in + effective_in)
//! ```
//!
//! Implementations evaluate this as one fraction so nothing is truncated
//! before the final division.

use crate::domain::{Amount, FeeTier, Reserves, SwapDirection, SwapOrder, SwapResult, TxContext};
use crate::error::ExchangeError;

/// A pool that trades base currency against one asset.
///
/// # Errors
///
/// Fallible methods return [`ExchangeError`]; the common ones are
/// [`ExchangeError::InsufficientLiquidity`], [`ExchangeError::ZeroAmount`]
/// and [`ExchangeError::SlippageExceeded`].
pub trait SwapPool {
    /// Executes `order` on behalf of `ctx.sender()`.
    ///
    /// Reserves change only if every check passes, including the
    /// constant-product check on the resulting reserves.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::DeadlineExpired`] if `ctx.timestamp()` is past the
    ///   order deadline.
    /// - [`ExchangeError::ZeroAmount`] for a zero fixed amount.
    /// - [`ExchangeError::InsufficientLiquidity`] if either reserve is empty
    ///   or the trade would yield nothing or drain the output reserve.
    /// - [`ExchangeError::SlippageExceeded`] /
    ///   [`ExchangeError::ExcessiveInputAmount`] when the order's bound is
    ///   violated.
    /// - [`ExchangeError::InvalidStateTransition`] if the product of the
    ///   reserves would decrease.
    fn swap(&mut self, ctx: &TxContext, order: &SwapOrder) -> Result<SwapResult, ExchangeError>;

    /// Output an exact-input trade of `amount_in` would yield right now.
    ///
    /// # Errors
    ///
    /// Same pricing errors as [`swap`](Self::swap), without the deadline
    /// and slippage checks.
    fn quote_swap_output(
        &self,
        direction: SwapDirection,
        amount_in: Amount,
    ) -> Result<Amount, ExchangeError>;

    /// Input an exact-output trade of `amount_out` would cost right now.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::InsufficientLiquidity`] if `amount_out` is not
    /// strictly less than the output reserve.
    fn quote_swap_input(
        &self,
        direction: SwapDirection,
        amount_out: Amount,
    ) -> Result<Amount, ExchangeError>;

    /// Snapshot of the reserves and share supply.
    fn current_reserves(&self) -> Reserves;

    /// The fee charged on every swap input, fixed at creation.
    #[must_use]
    fn fee_tier(&self) -> FeeTier;
}
