//! Value types shared by every layer of the exchange.
//!
//! Amounts and shares are raw `u128` newtypes with checked arithmetic;
//! requests (`SwapOrder`, `DepositRequest`, `WithdrawRequest`) carry their
//! own deadlines and slippage bounds; results (`SwapResult`, `Deposit`,
//! `Withdrawal`) report what actually moved.

mod address;
mod amount;
mod basis_points;
mod fee_tier;
mod liquidity_change;
mod reserves;
mod rounding;
mod shares;
mod swap_result;
mod swap_spec;
mod timestamp;
mod tx_context;

pub use address::Address;
pub use amount::Amount;
pub use basis_points::BasisPoints;
pub use fee_tier::FeeTier;
pub use liquidity_change::{Deposit, DepositRequest, WithdrawRequest, Withdrawal};
pub use reserves::Reserves;
pub use rounding::Rounding;
pub use shares::Shares;
pub use swap_result::SwapResult;
pub use swap_spec::{SwapDirection, SwapOrder, SwapSpec};
pub use timestamp::Timestamp;
pub use tx_context::TxContext;
