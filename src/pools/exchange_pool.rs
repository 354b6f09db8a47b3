//! One base/asset exchange pool.
//!
//! [`ExchangePool`] composes the [`ReserveLedger`], the [`ShareBook`], the
//! [`LiquidityManager`] and the [`SwapEngine`].  Every mutating operation is
//! split in two:
//!
//! 1. **stage**: compute the full outcome against the current state,
//!    including the next ledger and the share change, and run every check
//!    (deadline, bounds, product invariant).  Nothing is mutated.
//! 2. **commit**: install the staged outcome.
//!
//! The trait methods ([`SwapPool::swap`], [`LiquidityPool::add_liquidity`],
//! ...) do both back to back.  Settlement stages first, pulls the inputs,
//! and only then commits.

use tracing::{debug, info};

use super::{LiquidityManager, LiquidityPosition, ReserveLedger, ShareBook, SwapEngine};
use crate::config::ExchangeConfig;
use crate::domain::{
    Address, Amount, Deposit, DepositRequest, FeeTier, Reserves, Shares, SwapDirection, SwapOrder,
    SwapResult, TxContext, WithdrawRequest, Withdrawal,
};
use crate::error::ExchangeError;
use crate::pools::swap_engine::oriented;
use crate::traits::{FromConfig, LiquidityPool, SwapPool};

/// How a staged operation changes one provider's shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShareChange {
    None,
    Mint(Address, Shares),
    Burn(Address, Shares),
}

/// A fully checked operation waiting to be committed.
///
/// Produced by the `stage_*` methods of [`ExchangePool`].  Committing it to
/// a pool whose reserves moved since staging fails.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Staged<R> {
    receipt: R,
    prior: Reserves,
    next: ReserveLedger,
    shares: ShareChange,
}

impl<R> Staged<R> {
    /// What the operation will move once committed.
    pub const fn receipt(&self) -> &R {
        &self.receipt
    }

    /// Reserves after commit.
    pub const fn next_reserves(&self) -> Reserves {
        self.next.current_reserves()
    }
}

/// A constant-product pool trading base currency against one asset.
///
/// # Example
///
/// ```rust
/// use exchange_amm::config::ExchangeConfig;
/// use exchange_amm::domain::{
///     Address, Amount, DepositRequest, FeeTier, SwapDirection, SwapOrder, SwapSpec, Timestamp,
///     TxContext,
/// };
/// use exchange_amm::pools::ExchangePool;
/// use exchange_amm::traits::{FromConfig, LiquidityPool, SwapPool};
///
/// let cfg = ExchangeConfig::new(Address::from_bytes([7u8; 32]), FeeTier::default())
///     .expect("valid config");
/// let mut pool = ExchangePool::from_config(&cfg).expect("pool created");
///
/// let ctx = TxContext::new(Address::from_bytes([1u8; 32]), Timestamp::new(1_000));
/// let deposit = DepositRequest::new(Amount::new(10_000), Amount::new(10_000), Timestamp::NEVER);
/// pool.add_liquidity(&ctx, &deposit).expect("deposit ok");
///
/// let spec = SwapSpec::exact_in(Amount::new(1_000), Amount::new(900)).expect("non-zero");
/// let order = SwapOrder::new(SwapDirection::BaseToAsset, spec, Timestamp::NEVER);
/// let result = pool.swap(&ctx, &order).expect("swap ok");
/// assert_eq!(result.amount_out(), Amount::new(906));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangePool {
    config: ExchangeConfig,
    ledger: ReserveLedger,
    book: ShareBook,
    engine: SwapEngine,
}

impl ExchangePool {
    /// Restores a pool from stored reserves and positions.
    ///
    /// # Errors
    ///
    /// - Configuration errors from [`ExchangeConfig::validate`].
    /// - [`ExchangeError::InvalidStateTransition`] if the reserves are
    ///   inconsistent or the positions do not add up to the share supply.
    pub fn from_parts(
        config: ExchangeConfig,
        reserves: Reserves,
        positions: impl IntoIterator<Item = LiquidityPosition>,
    ) -> Result<Self, ExchangeError> {
        config.validate()?;
        let ledger = ReserveLedger::from_parts(reserves)?;
        let book = ShareBook::from_positions(positions)?;
        if book.total()? != reserves.total_shares {
            return Err(ExchangeError::InvalidStateTransition(
                "positions do not add up to the share supply",
            ));
        }
        Ok(Self {
            config,
            ledger,
            book,
            engine: SwapEngine::new(config.fee_tier()),
        })
    }

    /// The pool's configuration.
    #[must_use]
    pub const fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    /// The paired asset.
    #[must_use]
    pub const fn asset(&self) -> Address {
        self.config.asset()
    }

    /// The pool's account in the transfer ledgers.
    #[must_use]
    pub fn address(&self) -> Address {
        self.config.pool_address()
    }

    /// Open liquidity positions in owner order.
    pub fn positions(&self) -> impl Iterator<Item = LiquidityPosition> + '_ {
        self.book.positions()
    }

    // -- staging ------------------------------------------------------------

    /// Checks and prices `order` without mutating the pool.
    ///
    /// # Errors
    ///
    /// See [`SwapPool::swap`].
    pub fn stage_swap(
        &self,
        ctx: &TxContext,
        order: &SwapOrder,
    ) -> Result<Staged<SwapResult>, ExchangeError> {
        order.deadline().ensure_not_expired(ctx.timestamp())?;
        let prior = self.ledger.current_reserves();
        let result = self.engine.quote(&prior, order.direction(), order.spec())?;
        let next = self
            .ledger
            .apply_swap(result.direction(), result.amount_in(), result.amount_out())?;
        debug!(pool = %self.address(), %result, "staged swap");
        Ok(Staged {
            receipt: result,
            prior,
            next,
            shares: ShareChange::None,
        })
    }

    /// Checks and plans a deposit without mutating the pool.
    ///
    /// # Errors
    ///
    /// See [`LiquidityPool::add_liquidity`].
    pub fn stage_deposit(
        &self,
        ctx: &TxContext,
        request: &DepositRequest,
    ) -> Result<Staged<Deposit>, ExchangeError> {
        let prior = self.ledger.current_reserves();
        let deposit = LiquidityManager::plan_deposit(&prior, request, ctx.timestamp())?;
        self.book.check_credit(&ctx.sender(), deposit.shares_issued)?;
        let next =
            self.ledger
                .apply_deposit(deposit.base_in, deposit.asset_in, deposit.shares_issued)?;
        Ok(Staged {
            receipt: deposit,
            prior,
            next,
            shares: ShareChange::Mint(ctx.sender(), deposit.shares_issued),
        })
    }

    /// Checks and plans a withdrawal without mutating the pool.
    ///
    /// # Errors
    ///
    /// See [`LiquidityPool::remove_liquidity`].
    pub fn stage_withdrawal(
        &self,
        ctx: &TxContext,
        request: &WithdrawRequest,
    ) -> Result<Staged<Withdrawal>, ExchangeError> {
        let prior = self.ledger.current_reserves();
        let held = self.book.shares_of(&ctx.sender());
        let withdrawal =
            LiquidityManager::plan_withdrawal(&prior, held, request, ctx.timestamp())?;
        let next = self.ledger.apply_withdrawal(
            withdrawal.base_out,
            withdrawal.asset_out,
            withdrawal.shares_burned,
        )?;
        Ok(Staged {
            receipt: withdrawal,
            prior,
            next,
            shares: ShareChange::Burn(ctx.sender(), withdrawal.shares_burned),
        })
    }

    /// Installs a staged operation and returns its receipt.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::InvalidStateTransition`] if the reserves changed
    ///   since the operation was staged.
    /// - [`ExchangeError::InsufficientShares`] if the provider's balance
    ///   changed underneath a staged withdrawal.
    pub fn commit<R>(&mut self, staged: Staged<R>) -> Result<R, ExchangeError> {
        if self.ledger.current_reserves() != staged.prior {
            return Err(ExchangeError::InvalidStateTransition(
                "operation was staged against different reserves",
            ));
        }
        match staged.shares {
            ShareChange::None => {}
            ShareChange::Mint(owner, shares) => self.book.credit(owner, shares)?,
            ShareChange::Burn(owner, shares) => self.book.debit(owner, shares)?,
        }
        self.ledger = staged.next;
        Ok(staged.receipt)
    }

    // -- share transfers ----------------------------------------------------

    /// Moves `shares` from `ctx.sender()` to `to`.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::ZeroAmount`] for a zero transfer.
    /// - [`ExchangeError::InsufficientShares`] if the sender holds fewer.
    pub fn transfer_shares(
        &mut self,
        ctx: &TxContext,
        to: Address,
        shares: Shares,
    ) -> Result<(), ExchangeError> {
        if shares.is_zero() {
            return Err(ExchangeError::ZeroAmount("share transfer must be non-zero"));
        }
        self.book.transfer(ctx.sender(), to, shares)?;
        info!(pool = %self.address(), from = %ctx.sender(), %to, %shares, "transferred shares");
        Ok(())
    }
}

impl FromConfig<ExchangeConfig> for ExchangePool {
    /// Creates an empty pool.
    ///
    /// # Errors
    ///
    /// Propagates [`ExchangeConfig::validate`].
    fn from_config(config: &ExchangeConfig) -> Result<Self, ExchangeError> {
        config.validate()?;
        Ok(Self {
            config: *config,
            ledger: ReserveLedger::new(),
            book: ShareBook::new(),
            engine: SwapEngine::new(config.fee_tier()),
        })
    }
}

impl SwapPool for ExchangePool {
    fn swap(&mut self, ctx: &TxContext, order: &SwapOrder) -> Result<SwapResult, ExchangeError> {
        let staged = self.stage_swap(ctx, order)?;
        self.commit(staged)
    }

    fn quote_swap_output(
        &self,
        direction: SwapDirection,
        amount_in: Amount,
    ) -> Result<Amount, ExchangeError> {
        let (reserve_in, reserve_out) = oriented(&self.ledger.current_reserves(), direction);
        self.engine.output_for(amount_in, reserve_in, reserve_out)
    }

    fn quote_swap_input(
        &self,
        direction: SwapDirection,
        amount_out: Amount,
    ) -> Result<Amount, ExchangeError> {
        let (reserve_in, reserve_out) = oriented(&self.ledger.current_reserves(), direction);
        self.engine.input_for(amount_out, reserve_in, reserve_out)
    }

    fn current_reserves(&self) -> Reserves {
        self.ledger.current_reserves()
    }

    fn fee_tier(&self) -> FeeTier {
        self.engine.fee_tier()
    }
}

impl LiquidityPool for ExchangePool {
    fn add_liquidity(
        &mut self,
        ctx: &TxContext,
        request: &DepositRequest,
    ) -> Result<Deposit, ExchangeError> {
        let staged = self.stage_deposit(ctx, request)?;
        self.commit(staged)
    }

    fn remove_liquidity(
        &mut self,
        ctx: &TxContext,
        request: &WithdrawRequest,
    ) -> Result<Withdrawal, ExchangeError> {
        let staged = self.stage_withdrawal(ctx, request)?;
        self.commit(staged)
    }

    fn total_shares(&self) -> Shares {
        self.ledger.current_reserves().total_shares
    }

    fn shares_of(&self, owner: &Address) -> Shares {
        self.book.shares_of(owner)
    }
}
