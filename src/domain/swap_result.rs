//! Outcome of a swap.

use core::fmt;

use super::{Amount, SwapDirection};
use crate::error::ExchangeError;

/// Amounts exchanged by one swap, and the fee the pool kept.
///
/// # Invariants
///
/// - `amount_in > 0` and `amount_out > 0`.
/// - `fee <= amount_in` (for one-unit inputs the rounded-up fee is the
///   whole input).
///
/// # Examples
///
/// ```
/// use exchange_amm::domain::{Amount, SwapDirection, SwapResult};
///
/// let r = SwapResult::new(SwapDirection::BaseToAsset, Amount::new(1_000), Amount::new(906), Amount::new(3));
/// assert!(r.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapResult {
    direction: SwapDirection,
    amount_in: Amount,
    amount_out: Amount,
    fee: Amount,
}

impl SwapResult {
    /// Creates a validated result.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::ZeroAmount`] if either amount is zero.
    /// - [`ExchangeError::InvalidStateTransition`] if `fee > amount_in`.
    pub fn new(
        direction: SwapDirection,
        amount_in: Amount,
        amount_out: Amount,
        fee: Amount,
    ) -> crate::error::Result<Self> {
        if amount_in.is_zero() {
            return Err(ExchangeError::ZeroAmount("swap input must be positive"));
        }
        if amount_out.is_zero() {
            return Err(ExchangeError::ZeroAmount("swap output must be positive"));
        }
        if fee > amount_in {
            return Err(ExchangeError::InvalidStateTransition(
                "fee cannot exceed the swap input",
            ));
        }
        Ok(Self {
            direction,
            amount_in,
            amount_out,
            fee,
        })
    }

    /// Direction of the trade.
    #[must_use]
    pub const fn direction(&self) -> SwapDirection {
        self.direction
    }

    /// Amount paid into the pool.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Amount paid out of the pool.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }

    /// Fee retained by the pool (informational, included in `amount_in`).
    pub const fn fee(&self) -> Amount {
        self.fee
    }
}

impl fmt::Display for SwapResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapResult({}: in={}, out={}, fee={})",
            self.direction, self.amount_in, self.amount_out, self.fee
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIR: SwapDirection = SwapDirection::BaseToAsset;

    #[test]
    fn rejects_zero_amounts() {
        assert!(SwapResult::new(DIR, Amount::ZERO, Amount::new(1), Amount::ZERO).is_err());
        assert!(SwapResult::new(DIR, Amount::new(1), Amount::ZERO, Amount::ZERO).is_err());
    }

    #[test]
    fn rejects_fee_above_input() {
        let r = SwapResult::new(DIR, Amount::new(3), Amount::new(1), Amount::new(4));
        assert!(matches!(r, Err(ExchangeError::InvalidStateTransition(_))));
    }

    #[test]
    fn one_unit_input_may_be_all_fee() {
        assert!(SwapResult::new(DIR, Amount::new(1), Amount::new(5), Amount::new(1)).is_ok());
    }

    #[test]
    fn display_mentions_direction() {
        let r = SwapResult::new(DIR, Amount::new(10), Amount::new(9), Amount::new(1));
        assert!(matches!(r, Ok(ref v) if v.to_string().contains("base->asset")));
    }
}
