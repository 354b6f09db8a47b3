//! Property-based tests for the pool invariants.
//!
//! 1. **Product monotonicity**: `base × asset` never decreases across swaps.
//! 2. **Proportional issuance**: shares issued are `⌊base × S / B⌋` and the
//!    asset pulled is at least `base × A / B`.
//! 3. **Deposit round trip**: deposit then withdraw returns at most what
//!    was deposited, on both sides.
//! 4. **Emptying**: the last provider burning everything leaves `(0, 0, 0)`.
//! 5. **Swap reversibility**: selling and buying back never gains.
//! 6. **Exact-output consistency**: the quoted input buys at least the
//!    requested output.

use proptest::prelude::*;

use crate::config::ExchangeConfig;
use crate::domain::{
    Address, Amount, DepositRequest, FeeTier, Shares, SwapDirection, SwapOrder, SwapSpec,
    Timestamp, TxContext, WithdrawRequest,
};
use crate::pools::ExchangePool;
use crate::traits::{FromConfig, LiquidityPool, SwapPool};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn provider() -> TxContext {
    TxContext::new(Address::from_bytes([1u8; 32]), Timestamp::new(1_000))
}

fn other_provider() -> TxContext {
    TxContext::new(Address::from_bytes([3u8; 32]), Timestamp::new(1_000))
}

fn trader() -> TxContext {
    TxContext::new(Address::from_bytes([2u8; 32]), Timestamp::new(1_000))
}

fn make_pool(base: u128, asset: u128) -> ExchangePool {
    let Ok(cfg) = ExchangeConfig::new(Address::from_bytes([7u8; 32]), FeeTier::default()) else {
        panic!("valid config");
    };
    let Ok(mut pool) = ExchangePool::from_config(&cfg) else {
        panic!("valid pool");
    };
    let req = DepositRequest::new(Amount::new(base), Amount::new(asset), Timestamp::NEVER);
    let Ok(_) = pool.add_liquidity(&provider(), &req) else {
        panic!("initial deposit");
    };
    pool
}

fn sell(direction: SwapDirection, amount: u128) -> Option<SwapOrder> {
    let spec = SwapSpec::exact_in(Amount::new(amount), Amount::ZERO).ok()?;
    Some(SwapOrder::new(direction, spec, Timestamp::NEVER))
}

fn product(pool: &ExchangePool) -> u128 {
    let r = pool.current_reserves();
    r.base.get() * r.asset.get()
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Reserves in [10_000, 10_000_000]; products stay well inside u128.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=10_000_000u128
}

fn direction_strategy() -> impl Strategy<Value = SwapDirection> {
    prop_oneof![
        Just(SwapDirection::BaseToAsset),
        Just(SwapDirection::AssetToBase)
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // -----------------------------------------------------------------------
    // Property 1: product monotonicity
    // -----------------------------------------------------------------------

    #[test]
    fn prop_product_never_decreases(
        base in reserve_strategy(),
        asset in reserve_strategy(),
        swaps in prop::collection::vec((direction_strategy(), 1u128..=1_000_000u128), 1..20),
    ) {
        let mut pool = make_pool(base, asset);
        for (direction, amount) in swaps {
            let Some(order) = sell(direction, amount) else { continue };
            let before = product(&pool);
            if pool.swap(&trader(), &order).is_ok() {
                prop_assert!(product(&pool) >= before);
            } else {
                prop_assert_eq!(product(&pool), before);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Property 2: proportional issuance
    // -----------------------------------------------------------------------

    #[test]
    fn prop_shares_are_proportional(
        base in reserve_strategy(),
        asset in reserve_strategy(),
        add in 1u128..=1_000_000u128,
    ) {
        let mut pool = make_pool(base, asset);
        let before = pool.current_reserves();
        let req = DepositRequest::new(Amount::new(add), Amount::MAX, Timestamp::NEVER);
        let Ok(d) = pool.add_liquidity(&other_provider(), &req) else {
            return Ok(());
        };
        let (b, a, s) = (before.base.get(), before.asset.get(), before.total_shares.get());
        let issued = d.shares_issued.get();
        prop_assert!(issued * b <= add * s);
        prop_assert!((issued + 1) * b > add * s);
        prop_assert!(d.asset_in.get() * b >= add * a);
        prop_assert!((d.asset_in.get() - 1) * b < add * a);
    }

    // -----------------------------------------------------------------------
    // Property 3: deposit round trip
    // -----------------------------------------------------------------------

    #[test]
    fn prop_deposit_round_trip_never_gains(
        base in reserve_strategy(),
        asset in reserve_strategy(),
        add in 1u128..=1_000_000u128,
    ) {
        let mut pool = make_pool(base, asset);
        let req = DepositRequest::new(Amount::new(add), Amount::MAX, Timestamp::NEVER);
        let Ok(d) = pool.add_liquidity(&other_provider(), &req) else {
            return Ok(());
        };
        let back =
            WithdrawRequest::new(d.shares_issued, Amount::ZERO, Amount::ZERO, Timestamp::NEVER);
        let Ok(w) = pool.remove_liquidity(&other_provider(), &back) else {
            panic!("withdrawing fresh shares must succeed");
        };
        prop_assert!(w.base_out <= d.base_in);
        prop_assert!(w.asset_out <= d.asset_in);
    }

    // -----------------------------------------------------------------------
    // Property 4: emptying
    // -----------------------------------------------------------------------

    #[test]
    fn prop_last_provider_empties_the_pool(
        base in reserve_strategy(),
        asset in reserve_strategy(),
        swaps in prop::collection::vec((direction_strategy(), 1u128..=100_000u128), 0..10),
    ) {
        let mut pool = make_pool(base, asset);
        for (direction, amount) in swaps {
            if let Some(order) = sell(direction, amount) {
                let _ = pool.swap(&trader(), &order);
            }
        }
        let reserves = pool.current_reserves();
        let all = WithdrawRequest::new(
            pool.shares_of(&provider().sender()),
            Amount::ZERO,
            Amount::ZERO,
            Timestamp::NEVER,
        );
        let Ok(w) = pool.remove_liquidity(&provider(), &all) else {
            panic!("burning every share must succeed");
        };
        prop_assert_eq!(w.base_out, reserves.base);
        prop_assert_eq!(w.asset_out, reserves.asset);
        prop_assert!(pool.current_reserves().is_empty());
        prop_assert_eq!(pool.total_shares(), Shares::ZERO);
    }

    // -----------------------------------------------------------------------
    // Property 5: swap reversibility
    // -----------------------------------------------------------------------

    #[test]
    fn prop_round_trip_swap_loses_value(
        base in reserve_strategy(),
        asset in reserve_strategy(),
        direction in direction_strategy(),
    ) {
        let mut pool = make_pool(base, asset);
        let swap_in = (base.min(asset) / 1_000).max(1);
        let Some(first) = sell(direction, swap_in) else { return Ok(()) };
        let Ok(out) = pool.swap(&trader(), &first) else { return Ok(()) };
        let Some(second) = sell(direction.reversed(), out.amount_out().get()) else {
            return Ok(());
        };
        let Ok(back) = pool.swap(&trader(), &second) else { return Ok(()) };
        prop_assert!(back.amount_out().get() <= swap_in);
    }

    // -----------------------------------------------------------------------
    // Property 6: exact-output consistency
    // -----------------------------------------------------------------------

    #[test]
    fn prop_quoted_input_buys_requested_output(
        base in reserve_strategy(),
        asset in reserve_strategy(),
        direction in direction_strategy(),
        fraction in 1u128..=900u128,
    ) {
        let pool = make_pool(base, asset);
        let (_, reserve_out) = match direction {
            SwapDirection::BaseToAsset => (base, asset),
            SwapDirection::AssetToBase => (asset, base),
        };
        let want = (reserve_out * fraction / 1_000).max(1);
        let Ok(input) = pool.quote_swap_input(direction, Amount::new(want)) else {
            return Ok(());
        };
        let Ok(bought) = pool.quote_swap_output(direction, input) else {
            panic!("quoted input must be sellable");
        };
        prop_assert!(bought.get() >= want);
    }
}
