//! Moving funds for pool operations.
//!
//! [`Settlement`] drives one pool operation against the base-currency and
//! asset [`TokenLedger`]s in checks-effects-interactions order:
//!
//! 1. stage the operation on the pool (every check, no mutation);
//! 2. pull the caller's inputs into the pool account;
//! 3. commit the staged operation;
//! 4. push the outputs out of the pool account.
//!
//! A failure at any step unwinds the transfers already made and restores
//! the pool, so the caller sees either the whole operation or none of it.

use tracing::{error, info, instrument};

use crate::domain::{
    Address, Amount, Deposit, DepositRequest, SwapDirection, SwapOrder, SwapResult, TxContext,
    WithdrawRequest, Withdrawal,
};
use crate::error::ExchangeError;
use crate::pools::ExchangePool;
use crate::traits::TokenLedger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Base,
    Asset,
}

#[derive(Debug, Clone, Copy)]
struct Move {
    side: Side,
    from: Address,
    to: Address,
    amount: Amount,
}

/// Settles pool operations against a base-currency ledger `B` and an asset
/// ledger `A`.
///
/// # Example
///
/// ```rust
/// use exchange_amm::config::ExchangeConfig;
/// use exchange_amm::domain::{Address, Amount, DepositRequest, FeeTier, Timestamp, TxContext};
/// use exchange_amm::pools::ExchangePool;
/// use exchange_amm::settlement::Settlement;
/// use exchange_amm::tokens::InMemoryToken;
/// use exchange_amm::traits::{FromConfig, TokenLedger};
///
/// let seller = Address::from_bytes([1u8; 32]);
/// let cfg = ExchangeConfig::new(Address::from_bytes([7u8; 32]), FeeTier::default()).expect("valid");
/// let mut pool = ExchangePool::from_config(&cfg).expect("pool");
///
/// let mut eth = InMemoryToken::new("ETH");
/// let mut tkn = InMemoryToken::new("TKN");
/// eth.mint(seller, Amount::new(5)).expect("mint");
/// tkn.mint(seller, Amount::new(5)).expect("mint");
/// eth.approve(seller, pool.address(), Amount::new(5));
/// tkn.approve(seller, pool.address(), Amount::new(5));
///
/// let ctx = TxContext::new(seller, Timestamp::new(1_632_752_700));
/// let req = DepositRequest::new(Amount::new(5), Amount::new(5), Timestamp::new(1_632_752_757));
/// Settlement::new(&mut eth, &mut tkn).add_liquidity(&mut pool, &ctx, &req).expect("deposit");
/// assert_eq!(tkn.balance_of(&pool.address()), Amount::new(5));
/// ```
#[derive(Debug)]
pub struct Settlement<'a, B, A> {
    base: &'a mut B,
    asset: &'a mut A,
}

impl<'a, B: TokenLedger, A: TokenLedger> Settlement<'a, B, A> {
    /// Settles against `base` (the base currency) and `asset`.
    pub fn new(base: &'a mut B, asset: &'a mut A) -> Self {
        Self { base, asset }
    }

    /// Deposits liquidity: pulls both sides from the sender, then mints
    /// shares.
    ///
    /// # Errors
    ///
    /// The pool's [`add_liquidity`](crate::traits::LiquidityPool::add_liquidity)
    /// errors, or [`ExchangeError::TransferFailed`] if a pull fails.
    #[instrument(skip_all, fields(pool = %pool.address(), sender = %ctx.sender()))]
    pub fn add_liquidity(
        &mut self,
        pool: &mut ExchangePool,
        ctx: &TxContext,
        request: &DepositRequest,
    ) -> Result<Deposit, ExchangeError> {
        let staged = pool.stage_deposit(ctx, request)?;
        let deposit = *staged.receipt();
        let (sender, pool_address) = (ctx.sender(), pool.address());

        let mut done = Vec::with_capacity(2);
        for (side, amount) in [(Side::Base, deposit.base_in), (Side::Asset, deposit.asset_in)] {
            let pull = Move {
                side,
                from: sender,
                to: pool_address,
                amount,
            };
            if let Err(cause) = self.pull(pull) {
                return Err(self.unwind(&done, cause));
            }
            done.push(pull);
        }
        if let Err(cause) = pool.commit(staged) {
            return Err(self.unwind(&done, cause));
        }
        info!(%deposit, "settled deposit");
        Ok(deposit)
    }

    /// Withdraws liquidity: burns shares, then pays both sides to the
    /// sender.
    ///
    /// # Errors
    ///
    /// The pool's
    /// [`remove_liquidity`](crate::traits::LiquidityPool::remove_liquidity)
    /// errors, or [`ExchangeError::TransferFailed`] if a payout fails.
    #[instrument(skip_all, fields(pool = %pool.address(), sender = %ctx.sender()))]
    pub fn remove_liquidity(
        &mut self,
        pool: &mut ExchangePool,
        ctx: &TxContext,
        request: &WithdrawRequest,
    ) -> Result<Withdrawal, ExchangeError> {
        let staged = pool.stage_withdrawal(ctx, request)?;
        let withdrawal = *staged.receipt();
        let (sender, pool_address) = (ctx.sender(), pool.address());

        let snapshot = pool.clone();
        pool.commit(staged)?;

        let mut done = Vec::with_capacity(2);
        for (side, amount) in [
            (Side::Base, withdrawal.base_out),
            (Side::Asset, withdrawal.asset_out),
        ] {
            if amount.is_zero() {
                continue;
            }
            let push = Move {
                side,
                from: pool_address,
                to: sender,
                amount,
            };
            if let Err(cause) = self.push(push) {
                *pool = snapshot;
                return Err(self.unwind(&done, cause));
            }
            done.push(push);
        }
        info!(%withdrawal, "settled withdrawal");
        Ok(withdrawal)
    }

    /// Swaps: pulls the input from the sender, then pays the output to the
    /// order's recipient (the sender by default).
    ///
    /// # Errors
    ///
    /// The pool's [`swap`](crate::traits::SwapPool::swap) errors, or
    /// [`ExchangeError::TransferFailed`] if either transfer fails.
    #[instrument(
        skip_all,
        fields(pool = %pool.address(), sender = %ctx.sender(), direction = %order.direction())
    )]
    pub fn swap(
        &mut self,
        pool: &mut ExchangePool,
        ctx: &TxContext,
        order: &SwapOrder,
    ) -> Result<SwapResult, ExchangeError> {
        let staged = pool.stage_swap(ctx, order)?;
        let result = *staged.receipt();
        let (sender, pool_address) = (ctx.sender(), pool.address());
        let (side_in, side_out) = match result.direction() {
            SwapDirection::BaseToAsset => (Side::Base, Side::Asset),
            SwapDirection::AssetToBase => (Side::Asset, Side::Base),
        };

        let pull = Move {
            side: side_in,
            from: sender,
            to: pool_address,
            amount: result.amount_in(),
        };
        self.pull(pull)?;

        let snapshot = pool.clone();
        if let Err(cause) = pool.commit(staged) {
            return Err(self.unwind(&[pull], cause));
        }

        let push = Move {
            side: side_out,
            from: pool_address,
            to: order.recipient().unwrap_or(sender),
            amount: result.amount_out(),
        };
        if let Err(cause) = self.push(push) {
            *pool = snapshot;
            return Err(self.unwind(&[pull], cause));
        }
        info!(%result, recipient = %push.to, "settled swap");
        Ok(result)
    }

    // -- transfers ----------------------------------------------------------

    fn ledger(&mut self, side: Side) -> &mut dyn TokenLedger {
        match side {
            Side::Base => &mut *self.base,
            Side::Asset => &mut *self.asset,
        }
    }

    fn pull(&mut self, m: Move) -> Result<(), ExchangeError> {
        self.ledger(m.side).transfer_from(m.from, m.to, m.amount)
    }

    fn push(&mut self, m: Move) -> Result<(), ExchangeError> {
        self.ledger(m.side).transfer(m.from, m.to, m.amount)
    }

    /// Reverses `done` newest first and returns the error to report.
    fn unwind(&mut self, done: &[Move], cause: ExchangeError) -> ExchangeError {
        for m in done.iter().rev() {
            if let Err(e) = self.ledger(m.side).transfer(m.to, m.from, m.amount) {
                error!(
                    side = ?m.side,
                    from = %m.to,
                    to = %m.from,
                    amount = %m.amount,
                    error = %e,
                    "failed to reverse transfer"
                );
                return ExchangeError::TransferFailed(format!(
                    "{cause}; reversing a {:?} transfer of {} also failed: {e}",
                    m.side, m.amount
                ));
            }
        }
        cause
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::config::ExchangeConfig;
    use crate::domain::{FeeTier, Shares, SwapSpec, Timestamp};
    use crate::tokens::InMemoryToken;
    use crate::traits::{FromConfig, LiquidityPool, SwapPool};

    const DEADLINE: Timestamp = Timestamp::new(1_632_752_757);

    fn seller() -> Address {
        Address::from_bytes([1u8; 32])
    }

    fn trader() -> Address {
        Address::from_bytes([2u8; 32])
    }

    fn ctx(sender: Address) -> TxContext {
        TxContext::new(sender, Timestamp::new(1_632_752_700))
    }

    fn a(v: u128) -> Amount {
        Amount::new(v)
    }

    struct Fixture {
        pool: ExchangePool,
        eth: InMemoryToken,
        tkn: InMemoryToken,
    }

    impl Fixture {
        fn new() -> Self {
            let Ok(cfg) = ExchangeConfig::new(Address::from_bytes([7u8; 32]), FeeTier::default())
            else {
                panic!("valid config");
            };
            let Ok(pool) = ExchangePool::from_config(&cfg) else {
                panic!("valid pool");
            };
            Self {
                pool,
                eth: InMemoryToken::new("ETH"),
                tkn: InMemoryToken::new("TKN"),
            }
        }

        fn fund(&mut self, who: Address, eth: u128, tkn: u128) {
            let (Ok(()), Ok(())) = (self.eth.mint(who, a(eth)), self.tkn.mint(who, a(tkn))) else {
                panic!("mint ok");
            };
            let pool = self.pool.address();
            self.eth.approve(who, pool, a(eth));
            self.tkn.approve(who, pool, a(tkn));
        }

        fn deposit(
            &mut self,
            who: Address,
            base: u128,
            asset: u128,
        ) -> Result<Deposit, ExchangeError> {
            let req = DepositRequest::new(a(base), a(asset), DEADLINE);
            Settlement::new(&mut self.eth, &mut self.tkn).add_liquidity(
                &mut self.pool,
                &ctx(who),
                &req,
            )
        }

        /// Funds the seller and makes the opening deposit.
        fn seed(&mut self, base: u128, asset: u128) {
            self.fund(seller(), base, asset);
            let Ok(_) = self.deposit(seller(), base, asset) else {
                panic!("opening deposit");
            };
        }

        fn swap(&mut self, who: Address, order: &SwapOrder) -> Result<SwapResult, ExchangeError> {
            Settlement::new(&mut self.eth, &mut self.tkn).swap(&mut self.pool, &ctx(who), order)
        }
    }

    fn sell_eth(amount: u128) -> SwapOrder {
        let Ok(spec) = SwapSpec::exact_in(a(amount), Amount::ZERO) else {
            panic!("valid spec");
        };
        SwapOrder::new(SwapDirection::BaseToAsset, spec, DEADLINE)
    }

    // -- liquidity ----------------------------------------------------------

    #[test]
    fn deposit_and_withdrawal_move_balances() {
        let mut f = Fixture::new();
        f.fund(seller(), 5, 5);
        let Ok(_) = f.deposit(seller(), 5, 5) else {
            panic!("deposit ok");
        };
        assert_eq!(f.tkn.balance_of(&f.pool.address()), a(5));
        assert_eq!(f.eth.balance_of(&f.pool.address()), a(5));
        assert_eq!(f.pool.total_shares(), Shares::new(5));

        let req = WithdrawRequest::new(Shares::new(5), a(5), a(5), DEADLINE);
        let Ok(w) = Settlement::new(&mut f.eth, &mut f.tkn).remove_liquidity(
            &mut f.pool,
            &ctx(seller()),
            &req,
        ) else {
            panic!("withdrawal ok");
        };
        assert_eq!((w.base_out, w.asset_out), (a(5), a(5)));
        assert_eq!(f.tkn.balance_of(&f.pool.address()), Amount::ZERO);
        assert_eq!(f.tkn.balance_of(&seller()), a(5));
        assert!(f.pool.current_reserves().is_empty());
    }

    #[test]
    fn failed_asset_pull_refunds_base() {
        let mut f = Fixture::new();
        f.fund(seller(), 5, 5);
        f.tkn.approve(seller(), f.pool.address(), a(4));
        assert!(matches!(
            f.deposit(seller(), 5, 5),
            Err(ExchangeError::TransferFailed(_))
        ));
        assert_eq!(f.eth.balance_of(&seller()), a(5));
        assert_eq!(f.eth.balance_of(&f.pool.address()), Amount::ZERO);
        assert!(f.pool.current_reserves().is_empty());
    }

    #[test]
    fn failed_payout_restores_the_position() {
        let mut f = Fixture::new();
        f.seed(5, 5);
        let before = f.pool.clone();
        f.tkn.freeze(seller());
        let req = WithdrawRequest::new(Shares::new(5), a(0), a(0), DEADLINE);
        let mut settlement = Settlement::new(&mut f.eth, &mut f.tkn);
        assert!(matches!(
            settlement.remove_liquidity(&mut f.pool, &ctx(seller()), &req),
            Err(ExchangeError::TransferFailed(_))
        ));
        assert_eq!(f.pool, before);
        assert_eq!(f.eth.balance_of(&f.pool.address()), a(5));
        assert_eq!(f.eth.balance_of(&seller()), Amount::ZERO);
    }

    // -- swaps --------------------------------------------------------------

    #[test]
    fn swap_pulls_input_and_pays_output() {
        let mut f = Fixture::new();
        f.seed(10_000, 10_000);
        f.fund(trader(), 1_000, 0);
        let Ok(r) = f.swap(trader(), &sell_eth(1_000)) else {
            panic!("swap ok");
        };
        assert_eq!(r.amount_out(), a(906));
        assert_eq!(f.tkn.balance_of(&trader()), a(906));
        assert_eq!(f.eth.balance_of(&trader()), Amount::ZERO);
        assert_eq!(f.eth.balance_of(&f.pool.address()), a(11_000));
        assert_eq!(f.tkn.balance_of(&f.pool.address()), f.pool.current_reserves().asset);
    }

    #[test]
    fn swap_output_goes_to_recipient() {
        let mut f = Fixture::new();
        f.seed(10_000, 10_000);
        f.fund(trader(), 1_000, 0);
        let friend = Address::from_bytes([5u8; 32]);
        let Ok(_) = f.swap(trader(), &sell_eth(1_000).to(friend)) else {
            panic!("swap ok");
        };
        assert_eq!(f.tkn.balance_of(&friend), a(906));
        assert_eq!(f.tkn.balance_of(&trader()), Amount::ZERO);
    }

    #[test]
    fn failed_output_push_rolls_everything_back() {
        let mut f = Fixture::new();
        f.seed(10_000, 10_000);
        f.fund(trader(), 1_000, 0);
        f.tkn.freeze(trader());
        let before = f.pool.clone();
        assert!(matches!(
            f.swap(trader(), &sell_eth(1_000)),
            Err(ExchangeError::TransferFailed(_))
        ));
        assert_eq!(f.pool, before);
        assert_eq!(f.eth.balance_of(&trader()), a(1_000));
        assert_eq!(f.eth.balance_of(&f.pool.address()), a(10_000));
    }

    #[test]
    fn pool_errors_move_nothing() {
        let mut f = Fixture::new();
        f.seed(10_000, 10_000);
        f.fund(trader(), 1_000, 0);
        let Ok(spec) = SwapSpec::exact_in(a(1_000), a(907)) else {
            panic!("valid spec");
        };
        let order = SwapOrder::new(SwapDirection::BaseToAsset, spec, DEADLINE);
        assert!(matches!(
            f.swap(trader(), &order),
            Err(ExchangeError::SlippageExceeded { .. })
        ));
        assert_eq!(f.eth.balance_of(&trader()), a(1_000));
    }
}
