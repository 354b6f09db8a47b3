//! Seams between the exchange core and its collaborators.
//!
//! - [`SwapPool`] / [`LiquidityPool`]: what a pool offers callers.
//! - [`FromConfig`]: how the registry builds pools.
//! - [`TokenLedger`]: the external balance ledgers settlement moves funds in.
//! - [`Clock`]: where transaction timestamps come from.

mod clock;
mod from_config;
mod liquidity_pool;
mod swap_pool;
mod token_ledger;

pub use clock::{Clock, ManualClock, SystemClock};
pub use from_config::FromConfig;
pub use liquidity_pool::LiquidityPool;
pub use swap_pool::SwapPool;
pub use token_ledger::TokenLedger;
