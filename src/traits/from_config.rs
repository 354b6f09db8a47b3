//! Configuration-driven construction.
//!
//! The registry builds every pool through [`FromConfig`], so a pool that
//! exists has passed its configuration's validation.

use crate::error::ExchangeError;

/// Builds `Self` from a validated configuration `C`.
///
/// # Errors
///
/// Returns [`ExchangeError::InvalidConfiguration`] or
/// [`ExchangeError::InvalidFee`] if `config` is rejected.
pub trait FromConfig<C> {
    /// Validates `config` and constructs an instance from it.
    ///
    /// # Errors
    ///
    /// See the trait documentation.
    fn from_config(config: &C) -> Result<Self, ExchangeError>
    where
        Self: Sized;
}
