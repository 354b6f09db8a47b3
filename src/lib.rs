//! # Exchange AMM
//!
//! Constant-product exchange pools pairing a base currency with one asset,
//! in the style of Uniswap v1: providers deposit both sides for pool
//! shares, traders swap in either direction against the reserves, and a
//! fee taken from every input stays in the pool.
//!
//! All amounts are `u128` integers.  Every product and ratio is evaluated
//! in 256 bits and rounded against the caller, so the reserve product never
//! decreases across a swap and a deposit never mints more than it pays for.
//!
//! # Quick Start
//!
//! ```rust
//! use exchange_amm::config::ExchangeConfig;
//! use exchange_amm::domain::{
//!     Address, Amount, DepositRequest, FeeTier, SwapDirection, SwapOrder, SwapSpec, Timestamp,
//!     TxContext,
//! };
//! use exchange_amm::factory::PoolRegistry;
//! use exchange_amm::traits::{LiquidityPool, SwapPool};
//!
//! let provider = Address::from_bytes([1u8; 32]);
//! let asset = Address::from_bytes([7u8; 32]);
//!
//! // 1. Register an exchange for the asset
//! let mut registry = PoolRegistry::new();
//! let config = ExchangeConfig::new(asset, FeeTier::default()).expect("valid config");
//! registry.create_exchange(&config).expect("new exchange");
//! let pool = registry.resolve_pool_mut(&asset).expect("registered");
//!
//! // 2. Seed it
//! let ctx = TxContext::new(provider, Timestamp::new(1_000));
//! let deposit = DepositRequest::new(Amount::new(10_000), Amount::new(10_000), Timestamp::new(2_000));
//! pool.add_liquidity(&ctx, &deposit).expect("deposit");
//!
//! // 3. Sell 1 000 units of the base currency
//! let spec = SwapSpec::exact_in(Amount::new(1_000), Amount::new(900)).expect("non-zero");
//! let order = SwapOrder::new(SwapDirection::BaseToAsset, spec, Timestamp::new(2_000));
//! let result = pool.swap(&ctx, &order).expect("swap");
//!
//! assert_eq!(result.amount_out(), Amount::new(906));
//! assert_eq!(result.fee(), Amount::new(3));
//! ```
//!
//! The pool methods above only move reserves.  To move balances in the
//! base-currency and asset ledgers as well, drive the same operations
//! through [`settlement::Settlement`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Registry    │  asset -> pool, pool address -> asset
//! └──────┬───────┘
//!        │ resolve_pool(asset)
//!        ▼
//! ┌──────────────┐       ┌──────────────┐
//! │  Settlement   │──────▶│ TokenLedgers │  transfer_from / transfer
//! └──────┬───────┘       └──────────────┘
//!        │ stage -> pull -> commit -> push
//!        ▼
//! ┌──────────────┐
//! │ ExchangePool  │  ReserveLedger + ShareBook + SwapEngine
//! └──────┬───────┘
//!        │ PoolRecord
//!        ▼
//! ┌──────────────┐
//! │  PoolStore    │  FileStore, MemoryStore
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`Address`](domain::Address), requests and receipts |
//! | [`traits`] | [`SwapPool`](traits::SwapPool), [`LiquidityPool`](traits::LiquidityPool), [`TokenLedger`](traits::TokenLedger), [`Clock`](traits::Clock) |
//! | [`config`] | [`ExchangeConfig`](config::ExchangeConfig) |
//! | [`pools`] | [`ExchangePool`](pools::ExchangePool) and its components |
//! | [`factory`] | [`PoolRegistry`](factory::PoolRegistry) and the thread-safe [`SharedRegistry`](factory::SharedRegistry) |
//! | [`settlement`] | Atomic fund movement around pool operations |
//! | [`storage`] | Crash-consistent pool persistence |
//! | [`tokens`] | [`InMemoryToken`](tokens::InMemoryToken) ledger |
//! | [`math`] | Checked and 256-bit arithmetic |
//! | [`error`] | [`ExchangeError`](error::ExchangeError) |
//! | [`prelude`] | Convenience re-exports |

pub mod config;
pub mod domain;
pub mod error;
pub mod factory;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod settlement;
pub mod storage;
pub mod tokens;
pub mod traits;
