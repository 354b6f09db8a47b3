//! Per-provider share balances.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Address, Shares};
use crate::error::ExchangeError;
use crate::math::CheckedArithmetic;

/// One provider's claim on a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiquidityPosition {
    /// The provider.
    pub owner: Address,
    /// Shares held, always non-zero for a listed position.
    pub shares: Shares,
}

/// Share balances keyed by owner.
///
/// Positions appear on first credit and disappear when they reach zero, so
/// the book never lists an empty position.  The pool keeps the sum of all
/// balances equal to its ledger's `total_shares`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareBook {
    balances: BTreeMap<Address, Shares>,
}

impl ShareBook {
    /// An empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a book from stored positions.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::InvalidStateTransition`] for a zero or duplicate
    ///   position.
    pub fn from_positions(
        positions: impl IntoIterator<Item = LiquidityPosition>,
    ) -> Result<Self, ExchangeError> {
        let mut balances = BTreeMap::new();
        for p in positions {
            if p.shares.is_zero() {
                return Err(ExchangeError::InvalidStateTransition(
                    "stored position holds zero shares",
                ));
            }
            if balances.insert(p.owner, p.shares).is_some() {
                return Err(ExchangeError::InvalidStateTransition(
                    "duplicate stored position",
                ));
            }
        }
        Ok(Self { balances })
    }

    /// Shares held by `owner`.
    #[must_use]
    pub fn shares_of(&self, owner: &Address) -> Shares {
        self.balances.get(owner).copied().unwrap_or(Shares::ZERO)
    }

    /// Sum of all balances.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::Overflow`] if the balances cannot be summed.
    pub fn total(&self) -> Result<Shares, ExchangeError> {
        self.balances
            .values()
            .try_fold(Shares::ZERO, |acc, s| acc.safe_add(s))
    }

    /// Number of open positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    /// `true` when no one holds shares.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Open positions in owner order.
    pub fn positions(&self) -> impl Iterator<Item = LiquidityPosition> + '_ {
        self.balances
            .iter()
            .map(|(owner, shares)| LiquidityPosition {
                owner: *owner,
                shares: *shares,
            })
    }

    /// Checks that `owner` can receive `shares` more.
    pub(crate) fn check_credit(
        &self,
        owner: &Address,
        shares: Shares,
    ) -> Result<(), ExchangeError> {
        self.shares_of(owner).safe_add(&shares).map(|_| ())
    }

    /// Checks that `owner` holds at least `shares`.
    pub(crate) fn check_debit(
        &self,
        owner: &Address,
        shares: Shares,
    ) -> Result<(), ExchangeError> {
        let held = self.shares_of(owner);
        if held < shares {
            return Err(ExchangeError::InsufficientShares {
                held,
                requested: shares,
            });
        }
        Ok(())
    }

    pub(crate) fn credit(&mut self, owner: Address, shares: Shares) -> Result<(), ExchangeError> {
        if shares.is_zero() {
            return Ok(());
        }
        let next = self.shares_of(&owner).safe_add(&shares)?;
        self.balances.insert(owner, next);
        Ok(())
    }

    pub(crate) fn debit(&mut self, owner: Address, shares: Shares) -> Result<(), ExchangeError> {
        self.check_debit(&owner, shares)?;
        let next = self.shares_of(&owner).safe_sub(&shares)?;
        if next.is_zero() {
            self.balances.remove(&owner);
        } else {
            self.balances.insert(owner, next);
        }
        Ok(())
    }

    /// Moves shares between owners.  A self-transfer is a no-op once the
    /// balance check passes.
    pub(crate) fn transfer(
        &mut self,
        from: Address,
        to: Address,
        shares: Shares,
    ) -> Result<(), ExchangeError> {
        self.check_debit(&from, shares)?;
        if from == to {
            return Ok(());
        }
        self.check_credit(&to, shares)?;
        self.debit(from, shares)?;
        self.credit(to, shares)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn credit(book: &mut ShareBook, owner: Address, shares: u128) {
        let Ok(()) = book.credit(owner, Shares::new(shares)) else {
            panic!("credit ok");
        };
    }

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 32])
    }

    #[test]
    fn credit_and_debit_track_balances() {
        let mut book = ShareBook::new();
        let Ok(()) = book.credit(addr(1), Shares::new(5)) else {
            panic!("credit ok");
        };
        assert_eq!(book.shares_of(&addr(1)), Shares::new(5));
        let Ok(()) = book.debit(addr(1), Shares::new(2)) else {
            panic!("debit ok");
        };
        assert_eq!(book.shares_of(&addr(1)), Shares::new(3));
        assert_eq!(book.total(), Ok(Shares::new(3)));
    }

    #[test]
    fn zero_positions_are_removed() {
        let mut book = ShareBook::new();
        credit(&mut book, addr(1), 5);
        let Ok(()) = book.debit(addr(1), Shares::new(5)) else {
            panic!("debit ok");
        };
        assert!(book.is_empty());
        assert_eq!(book.positions().count(), 0);
    }

    #[test]
    fn zero_credit_opens_nothing() {
        let mut book = ShareBook::new();
        credit(&mut book, addr(1), 0);
        assert!(book.is_empty());
    }

    #[test]
    fn overdraw_reports_held_and_requested() {
        let mut book = ShareBook::new();
        credit(&mut book, addr(1), 5);
        assert_eq!(
            book.debit(addr(1), Shares::new(6)),
            Err(ExchangeError::InsufficientShares {
                held: Shares::new(5),
                requested: Shares::new(6),
            })
        );
        assert_eq!(book.shares_of(&addr(1)), Shares::new(5));
    }

    #[test]
    fn transfer_moves_shares_and_preserves_total() {
        let mut book = ShareBook::new();
        credit(&mut book, addr(1), 5);
        let Ok(()) = book.transfer(addr(1), addr(2), Shares::new(5)) else {
            panic!("transfer ok");
        };
        assert_eq!(book.shares_of(&addr(1)), Shares::ZERO);
        assert_eq!(book.shares_of(&addr(2)), Shares::new(5));
        assert_eq!(book.len(), 1);
        assert_eq!(book.total(), Ok(Shares::new(5)));
    }

    #[test]
    fn self_transfer_still_checks_balance() {
        let mut book = ShareBook::new();
        credit(&mut book, addr(1), 5);
        assert!(book.transfer(addr(1), addr(1), Shares::new(5)).is_ok());
        assert!(book.transfer(addr(1), addr(1), Shares::new(6)).is_err());
        assert_eq!(book.shares_of(&addr(1)), Shares::new(5));
    }

    #[test]
    fn from_positions_rejects_zero_and_duplicates() {
        let p = |b, s| LiquidityPosition {
            owner: addr(b),
            shares: Shares::new(s),
        };
        assert!(ShareBook::from_positions([p(1, 0)]).is_err());
        assert!(ShareBook::from_positions([p(1, 2), p(1, 3)]).is_err());
        let Ok(book) = ShareBook::from_positions([p(1, 2), p(2, 3)]) else {
            panic!("valid positions");
        };
        assert_eq!(book.total(), Ok(Shares::new(5)));
    }
}
