//! Unified error types for the exchange library.
//!
//! Every fallible operation in the crate returns [`ExchangeError`].  All
//! variants are terminal for the requested operation: nothing is retried
//! internally and a failed operation never leaves a partial reserve
//! mutation behind.  Callers inspect the variant to decide whether to
//! resubmit with adjusted bounds (for example a looser slippage limit) or
//! to abandon the request.

use thiserror::Error;

use crate::domain::{Address, Amount, Shares, Timestamp};

/// Error returned by pool, registry, settlement and storage operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExchangeError {
    /// A required amount (deposit, swap input, shares to burn) was zero,
    /// or the operation would move zero units.
    #[error("zero amount: {0}")]
    ZeroAmount(&'static str),

    /// The transaction timestamp is past the caller's deadline.
    #[error("deadline expired: deadline {deadline}, now {now}")]
    DeadlineExpired {
        /// Deadline supplied by the caller.
        deadline: Timestamp,
        /// Timestamp of the transaction being executed.
        now: Timestamp,
    },

    /// The pool requires more input than the caller allowed.
    #[error("excessive input amount: required {required}, allowed {allowed}")]
    ExcessiveInputAmount {
        /// Input the pool requires.
        required: Amount,
        /// Maximum input the caller authorised.
        allowed: Amount,
    },

    /// The computed output is below the caller's minimum.
    #[error("slippage exceeded: {what} would be {actual}, minimum {minimum}")]
    SlippageExceeded {
        /// Which quantity missed its bound.
        what: &'static str,
        /// Quantity the pool would deliver.
        actual: u128,
        /// Minimum the caller accepts.
        minimum: u128,
    },

    /// The caller's position holds fewer shares than requested.
    #[error("insufficient shares: held {held}, requested {requested}")]
    InsufficientShares {
        /// Shares held by the caller.
        held: Shares,
        /// Shares the caller tried to burn or transfer.
        requested: Shares,
    },

    /// The pool has no reserves to trade against, or the trade would drain
    /// (or round to nothing on) the output side.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// A mutation would break the empty/funded invariant or decrease the
    /// reserve product.
    #[error("invalid state transition: {0}")]
    InvalidStateTransition(&'static str),

    /// Arithmetic overflow.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Unsupported fee parameters.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// Invalid pool or registry configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// No pool is registered for the asset.
    #[error("no pool registered for asset {0}")]
    PoolNotFound(Address),

    /// A pool is already registered for the asset.
    #[error("pool already exists for asset {0}")]
    PoolAlreadyExists(Address),

    /// The external ledger rejected a transfer.
    #[error("transfer failed: {0}")]
    TransferFailed(String),

    /// Durable storage failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// A record could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, ExchangeError>;

impl From<std::io::Error> for ExchangeError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ExchangeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
