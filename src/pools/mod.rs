//! The exchange pool and its building blocks.
//!
//! | Type | Role |
//! |------|------|
//! | [`ReserveLedger`] | reserves and share supply, invariant checks |
//! | [`ShareBook`] | per-provider share balances |
//! | [`LiquidityManager`] | deposit / withdrawal share math |
//! | [`SwapEngine`] | constant-product pricing |
//! | [`ExchangePool`] | one pool: stages, checks and commits operations |

mod exchange_pool;
mod ledger;
mod liquidity;
mod share_book;
mod swap_engine;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use exchange_pool::{ExchangePool, Staged};
pub use ledger::ReserveLedger;
pub use liquidity::LiquidityManager;
pub use share_book::{LiquidityPosition, ShareBook};
pub use swap_engine::{oriented, SwapEngine};
