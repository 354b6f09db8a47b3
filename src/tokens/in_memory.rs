//! A mintable ERC20-style ledger held in memory.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::{Address, Amount};
use crate::error::ExchangeError;
use crate::math::CheckedArithmetic;
use crate::traits::TokenLedger;

/// Balances, allowances and a freeze list for one token.
///
/// A frozen account can neither send nor receive, which lets callers model
/// tokens that refuse transfers to or from particular accounts.
///
/// # Example
///
/// ```rust
/// use exchange_amm::domain::{Address, Amount};
/// use exchange_amm::tokens::InMemoryToken;
/// use exchange_amm::traits::TokenLedger;
///
/// let seller = Address::from_bytes([1u8; 32]);
/// let exchange = Address::from_bytes([2u8; 32]);
/// let mut token = InMemoryToken::new("TKN");
/// token.mint(seller, Amount::new(5)).expect("mint");
/// token.approve(seller, exchange, Amount::new(5));
/// token.transfer_from(seller, exchange, Amount::new(5)).expect("allowed");
/// assert_eq!(token.balance_of(&exchange), Amount::new(5));
/// assert_eq!(token.allowance(&seller, &exchange), Amount::ZERO);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryToken {
    symbol: String,
    total_supply: Amount,
    balances: HashMap<Address, Amount>,
    allowances: HashMap<(Address, Address), Amount>,
    frozen: HashSet<Address>,
}

impl InMemoryToken {
    /// An empty ledger for `symbol`.
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    /// Token symbol, used in error messages and logs.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Total minted supply.
    pub const fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Creates `amount` new units for `to`.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::Overflow`] past `u128::MAX` total supply.
    pub fn mint(&mut self, to: Address, amount: Amount) -> Result<(), ExchangeError> {
        let supply = self.total_supply.safe_add(&amount)?;
        let balance = self.balance_of(&to).safe_add(&amount)?;
        self.total_supply = supply;
        self.balances.insert(to, balance);
        Ok(())
    }

    /// Lets `spender` pull up to `amount` from `owner`, replacing any
    /// earlier allowance.
    pub fn approve(&mut self, owner: Address, spender: Address, amount: Amount) {
        if amount.is_zero() {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), amount);
        }
    }

    /// What `spender` may still pull from `owner`.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Blocks every transfer from or to `account`.
    pub fn freeze(&mut self, account: Address) {
        self.frozen.insert(account);
    }

    /// Lifts a freeze.
    pub fn unfreeze(&mut self, account: &Address) {
        self.frozen.remove(account);
    }

    fn failed(&self, reason: &str) -> ExchangeError {
        ExchangeError::TransferFailed(format!("{}: {reason}", self.symbol))
    }

    fn move_balance(
        &mut self,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), ExchangeError> {
        if self.frozen.contains(&from) || self.frozen.contains(&to) {
            return Err(self.failed("account frozen"));
        }
        let from_balance = self
            .balance_of(&from)
            .safe_sub(&amount)
            .map_err(|_| self.failed("insufficient balance"))?;
        if from == to {
            return Ok(());
        }
        let to_balance = self.balance_of(&to).safe_add(&amount)?;
        self.balances.insert(from, from_balance);
        self.balances.insert(to, to_balance);
        Ok(())
    }
}

impl TokenLedger for InMemoryToken {
    fn transfer_from(
        &mut self,
        owner: Address,
        recipient: Address,
        amount: Amount,
    ) -> Result<(), ExchangeError> {
        let remaining = self
            .allowance(&owner, &recipient)
            .safe_sub(&amount)
            .map_err(|_| self.failed("allowance exceeded"))?;
        self.move_balance(owner, recipient, amount)?;
        self.approve(owner, recipient, remaining);
        debug!(token = %self.symbol, %owner, %recipient, %amount, "transfer_from");
        Ok(())
    }

    fn transfer(
        &mut self,
        sender: Address,
        recipient: Address,
        amount: Amount,
    ) -> Result<(), ExchangeError> {
        self.move_balance(sender, recipient, amount)?;
        debug!(token = %self.symbol, %sender, %recipient, %amount, "transfer");
        Ok(())
    }

    fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or(Amount::ZERO)
    }
}
