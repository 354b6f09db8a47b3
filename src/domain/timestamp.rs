//! Unix timestamps and deadline checks.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ExchangeError;

/// Seconds since the Unix epoch.
///
/// Used both for the timestamp of the transaction being executed and for
/// caller-supplied deadlines.  A deadline is inclusive: an operation
/// executing exactly at its deadline is still accepted.
///
/// # Examples
///
/// ```
/// use exchange_amm::domain::Timestamp;
///
/// let deadline = Timestamp::new(1_632_752_757);
/// assert!(deadline.ensure_not_expired(Timestamp::new(1_632_752_757)).is_ok());
/// assert!(deadline.ensure_not_expired(Timestamp::new(1_632_752_758)).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The Unix epoch.
    pub const EPOCH: Self = Self(0);

    /// A deadline that never expires.
    pub const NEVER: Self = Self(u64::MAX);

    /// Wraps raw seconds.
    #[must_use]
    pub const fn new(secs: u64) -> Self {
        Self(secs)
    }

    /// Returns the raw seconds.
    #[must_use]
    pub const fn as_secs(&self) -> u64 {
        self.0
    }

    /// Treats `self` as a deadline and rejects `now` past it.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::DeadlineExpired`] when `now > self`.
    pub fn ensure_not_expired(&self, now: Timestamp) -> crate::error::Result<()> {
        if now > *self {
            return Err(ExchangeError::DeadlineExpired {
                deadline: *self,
                now,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
