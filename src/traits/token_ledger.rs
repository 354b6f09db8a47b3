//! The transfer ledgers a pool settles against.
//!
//! A pool never holds balances itself: the base currency and the paired
//! asset each live in a [`TokenLedger`] where the pool has an account
//! (its [`Address`]).  Settlement pulls inputs into that account with
//! [`transfer_from`](TokenLedger::transfer_from) and pays outputs with
//! [`transfer`](TokenLedger::transfer).

use crate::domain::{Address, Amount};
use crate::error::ExchangeError;

/// An ERC20-style balance ledger.
pub trait TokenLedger {
    /// Moves `amount` from `owner` to `recipient`, spending the allowance
    /// `owner` granted to `recipient`.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::TransferFailed`] if the balance or allowance is
    /// insufficient; the ledger is unchanged in that case.
    fn transfer_from(
        &mut self,
        owner: Address,
        recipient: Address,
        amount: Amount,
    ) -> Result<(), ExchangeError>;

    /// Moves `amount` from `sender` to `recipient`.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::TransferFailed`] if `sender` cannot cover it.
    fn transfer(
        &mut self,
        sender: Address,
        recipient: Address,
        amount: Amount,
    ) -> Result<(), ExchangeError>;

    /// Current balance of `account`.
    fn balance_of(&self, account: &Address) -> Amount;
}
