//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use exchange_amm::prelude::*;
//! ```

pub use crate::domain::{
    Address, Amount, BasisPoints, Deposit, DepositRequest, FeeTier, Reserves, Rounding, Shares,
    SwapDirection, SwapOrder, SwapResult, SwapSpec, Timestamp, TxContext, WithdrawRequest,
    Withdrawal,
};

pub use crate::traits::{Clock, FromConfig, LiquidityPool, SwapPool, TokenLedger};

pub use crate::math::CheckedArithmetic;

pub use crate::config::ExchangeConfig;

pub use crate::error::{ExchangeError, Result};

pub use crate::factory::{PoolRegistry, SharedRegistry};

pub use crate::pools::ExchangePool;

pub use crate::settlement::Settlement;

pub use crate::storage::{FileStore, MemoryStore, PoolStore};
