//! `Result`-returning arithmetic for the amount newtypes.
//!
//! [`Amount`] and [`Shares`] expose `Option`-returning `checked_*`
//! methods; [`CheckedArithmetic`] lifts them into
//! [`ExchangeError::Overflow`] / [`ExchangeError::Underflow`] so reserve
//! code can use `?` throughout.
//!
//! # Examples
//!
//! ```
//! use exchange_amm::domain::Amount;
//! use exchange_amm::math::CheckedArithmetic;
//!
//! assert!(Amount::new(5).safe_sub(&Amount::new(6)).is_err());
//! assert_eq!(Amount::new(5).safe_add(&Amount::new(6)).ok(), Some(Amount::new(11)));
//! ```

use crate::domain::{Amount, Shares};
use crate::error::ExchangeError;

/// Fallible addition and subtraction.  Never saturates, never wraps.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Overflow`] past `u128::MAX`.
    fn safe_add(&self, other: &Self) -> Result<Self, ExchangeError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Underflow`] below zero.
    fn safe_sub(&self, other: &Self) -> Result<Self, ExchangeError>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, ExchangeError> {
        self.checked_add(other)
            .ok_or(ExchangeError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, ExchangeError> {
        self.checked_sub(other)
            .ok_or(ExchangeError::Underflow("amount subtraction underflow"))
    }
}

impl CheckedArithmetic for Shares {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, ExchangeError> {
        self.checked_add(other)
            .ok_or(ExchangeError::Overflow("share supply overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, ExchangeError> {
        self.checked_sub(other)
            .ok_or(ExchangeError::Underflow("share balance underflow"))
    }
}
