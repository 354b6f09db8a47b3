//! Reserve and share-supply bookkeeping for one pool.
//!
//! [`ReserveLedger`] is the only place reserve numbers change.  Its
//! primitive mutators (`credit`, `debit`, `mint_shares`, `burn_shares`) may
//! pass through inconsistent intermediate states, so the pool only uses
//! them through the composite `apply_*` methods, which stage on a copy and
//! check the empty/funded invariant before committing.
//!
//! # Invariants
//!
//! - `base == 0 ⇔ asset == 0 ⇔ total_shares == 0`.
//! - After a swap, `base × asset` never decreases (compared in 256 bits).

use core::cmp::Ordering;

use tracing::warn;

use crate::domain::{Amount, Reserves, Shares, SwapDirection};
use crate::error::ExchangeError;
use crate::math::{product_cmp, CheckedArithmetic};

/// Current reserves and outstanding shares of a pool.
///
/// # Examples
///
/// ```
/// use exchange_amm::domain::{Amount, Reserves, Shares};
/// use exchange_amm::pools::ReserveLedger;
///
/// let ledger = ReserveLedger::from_parts(Reserves::new(Amount::new(5), Amount::new(5), Shares::new(5)))
///     .expect("consistent reserves");
/// assert_eq!(ledger.current_reserves().total_shares, Shares::new(5));
///
/// // A funded pool with no shares is rejected.
/// assert!(ReserveLedger::from_parts(Reserves::new(Amount::new(5), Amount::new(5), Shares::ZERO)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReserveLedger {
    base: Amount,
    asset: Amount,
    total_shares: Shares,
}

impl ReserveLedger {
    /// An empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            base: Amount::ZERO,
            asset: Amount::ZERO,
            total_shares: Shares::ZERO,
        }
    }

    /// Rebuilds a ledger from a stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::InvalidStateTransition`] if the snapshot
    /// violates the empty/funded invariant.
    pub fn from_parts(reserves: Reserves) -> Result<Self, ExchangeError> {
        let ledger = Self {
            base: reserves.base,
            asset: reserves.asset,
            total_shares: reserves.total_shares,
        };
        ledger.ensure_consistent()?;
        Ok(ledger)
    }

    /// Snapshot of the reserves and share supply.
    #[must_use]
    pub const fn current_reserves(&self) -> Reserves {
        Reserves::new(self.base, self.asset, self.total_shares)
    }

    /// `true` when the pool holds nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_shares.is_zero()
    }

    // -- primitive mutators -------------------------------------------------

    pub(crate) fn credit(&mut self, base: Amount, asset: Amount) -> Result<(), ExchangeError> {
        self.base = self.base.safe_add(&base)?;
        self.asset = self.asset.safe_add(&asset)?;
        Ok(())
    }

    pub(crate) fn debit(&mut self, base: Amount, asset: Amount) -> Result<(), ExchangeError> {
        self.base = self.base.safe_sub(&base)?;
        self.asset = self.asset.safe_sub(&asset)?;
        Ok(())
    }

    pub(crate) fn mint_shares(&mut self, shares: Shares) -> Result<(), ExchangeError> {
        self.total_shares = self.total_shares.safe_add(&shares)?;
        Ok(())
    }

    pub(crate) fn burn_shares(&mut self, shares: Shares) -> Result<(), ExchangeError> {
        self.total_shares = self.total_shares.safe_sub(&shares)?;
        Ok(())
    }

    // -- composite operations -----------------------------------------------

    /// Ledger after a deposit; `self` is untouched.
    pub(crate) fn apply_deposit(
        &self,
        base: Amount,
        asset: Amount,
        shares: Shares,
    ) -> Result<Self, ExchangeError> {
        let mut next = *self;
        next.credit(base, asset)?;
        next.mint_shares(shares)?;
        next.ensure_consistent()?;
        Ok(next)
    }

    /// Ledger after a withdrawal; `self` is untouched.
    pub(crate) fn apply_withdrawal(
        &self,
        base: Amount,
        asset: Amount,
        shares: Shares,
    ) -> Result<Self, ExchangeError> {
        let mut next = *self;
        next.debit(base, asset)?;
        next.burn_shares(shares)?;
        next.ensure_consistent()?;
        Ok(next)
    }

    /// Ledger after a swap; `self` is untouched.  Rejects any result whose
    /// reserve product is below the current one.
    pub(crate) fn apply_swap(
        &self,
        direction: SwapDirection,
        amount_in: Amount,
        amount_out: Amount,
    ) -> Result<Self, ExchangeError> {
        let mut next = *self;
        match direction {
            SwapDirection::BaseToAsset => {
                next.credit(amount_in, Amount::ZERO)?;
                next.debit(Amount::ZERO, amount_out)?;
            }
            SwapDirection::AssetToBase => {
                next.credit(Amount::ZERO, amount_in)?;
                next.debit(amount_out, Amount::ZERO)?;
            }
        }
        next.ensure_consistent()?;
        next.check_product_not_decreased(&self.current_reserves())?;
        Ok(next)
    }

    // -- checks -------------------------------------------------------------

    /// Fails unless `base × asset ≥ prior.base × prior.asset`.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::InvalidStateTransition`] if the product
    /// decreased.
    pub fn check_product_not_decreased(&self, prior: &Reserves) -> Result<(), ExchangeError> {
        if product_cmp(self.base, self.asset, prior.base, prior.asset) == Ordering::Less {
            warn!(
                prior = %prior,
                next = %self.current_reserves(),
                "rejected reserve update that decreases the product"
            );
            return Err(ExchangeError::InvalidStateTransition(
                "reserve product would decrease",
            ));
        }
        Ok(())
    }

    /// Checks the empty/funded invariant.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::InvalidStateTransition`] if exactly one or
    /// two of base, asset and share supply are zero.
    pub fn ensure_consistent(&self) -> Result<(), ExchangeError> {
        let zeros = [
            self.base.is_zero(),
            self.asset.is_zero(),
            self.total_shares.is_zero(),
        ];
        if zeros.iter().all(|z| *z) || zeros.iter().all(|z| !*z) {
            return Ok(());
        }
        Err(ExchangeError::InvalidStateTransition(
            "reserves and share supply must be all zero or all non-zero",
        ))
    }
}
