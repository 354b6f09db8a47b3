//! Walkthrough of one base/asset exchange.
//!
//! Registers an exchange, funds it through settlement, trades both ways,
//! withdraws, and persists the pool to a temporary directory.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=exchange_amm=debug cargo run --example exchange_walkthrough
//! ```

use exchange_amm::config::ExchangeConfig;
use exchange_amm::domain::{
    Address, Amount, DepositRequest, FeeTier, Shares, SwapDirection, SwapOrder, SwapSpec,
    Timestamp, WithdrawRequest,
};
use exchange_amm::factory::PoolRegistry;
use exchange_amm::settlement::Settlement;
use exchange_amm::storage::{FileStore, PoolStore};
use exchange_amm::tokens::InMemoryToken;
use exchange_amm::traits::{Clock, LiquidityPool, SwapPool, SystemClock, TokenLedger};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Base/asset exchange ===\n");

    // ── 1. Register an exchange for the asset ───────────────────────────
    let asset = Address::from_bytes([0x70; 32]);
    let provider = Address::from_bytes([0x11; 32]);
    let trader = Address::from_bytes([0x22; 32]);

    let mut registry = PoolRegistry::new();
    let pool_address = registry.create_exchange(&ExchangeConfig::new(asset, FeeTier::default())?)?;
    println!("Exchange #{} for {asset}", registry.token_count());
    println!("  Pool account: {pool_address}");

    // ── 2. Fund the ledgers ─────────────────────────────────────────────
    let mut eth = InMemoryToken::new("ETH");
    let mut tkn = InMemoryToken::new("TKN");
    eth.mint(provider, Amount::new(1_000_000))?;
    tkn.mint(provider, Amount::new(4_000_000))?;
    eth.mint(trader, Amount::new(10_000))?;
    eth.approve(provider, pool_address, Amount::new(1_000_000));
    tkn.approve(provider, pool_address, Amount::new(4_000_000));
    eth.approve(trader, pool_address, Amount::new(10_000));

    let clock = SystemClock;
    let deadline = Timestamp::new(clock.now().as_secs() + 300);
    let pool = registry.resolve_pool_mut(&asset)?;

    // ── 3. Seed liquidity ───────────────────────────────────────────────
    let deposit = Settlement::new(&mut eth, &mut tkn).add_liquidity(
        pool,
        &clock.context_for(provider),
        &DepositRequest::new(Amount::new(1_000_000), Amount::new(4_000_000), deadline),
    )?;
    println!("\nDeposit: {deposit}");
    println!("  Reserves: {}", pool.current_reserves());

    // ── 4. Buy the asset with 10 000 base units ─────────────────────────
    let quote = pool.quote_swap_output(SwapDirection::BaseToAsset, Amount::new(10_000))?;
    let min_out = Amount::new(quote.get() - quote.get() / 100);
    let buy = SwapOrder::new(
        SwapDirection::BaseToAsset,
        SwapSpec::exact_in(Amount::new(10_000), min_out)?,
        deadline,
    );
    let bought = Settlement::new(&mut eth, &mut tkn).swap(pool, &clock.context_for(trader), &buy)?;
    println!("\nBuy:  {bought}");
    println!("  Trader holds {} TKN", tkn.balance_of(&trader));

    // ── 5. Sell half of it back for an exact base amount ────────────────
    let want = Amount::new(4_000);
    let max_in = pool.quote_swap_input(SwapDirection::AssetToBase, want)?;
    tkn.approve(trader, pool_address, max_in);
    let sell = SwapOrder::new(
        SwapDirection::AssetToBase,
        SwapSpec::exact_out(want, max_in)?,
        deadline,
    );
    let sold = Settlement::new(&mut eth, &mut tkn).swap(pool, &clock.context_for(trader), &sell)?;
    println!("Sell: {sold}");
    println!("  Reserves: {}", pool.current_reserves());

    // ── 6. Withdraw half the provider's shares ──────────────────────────
    let half = pool.shares_of(&provider).get() / 2;
    let withdrawal = Settlement::new(&mut eth, &mut tkn).remove_liquidity(
        pool,
        &clock.context_for(provider),
        &WithdrawRequest::new(Shares::new(half), Amount::ZERO, Amount::ZERO, deadline),
    )?;
    println!("\nWithdrawal: {withdrawal}");
    println!("  Reserves: {}", pool.current_reserves());

    // ── 7. Persist and reload ───────────────────────────────────────────
    let dir = std::env::temp_dir().join("exchange-amm-walkthrough");
    let store = FileStore::open(&dir)?;
    store.save(pool)?;
    let reloaded = store.load(&pool_address)?;
    println!(
        "\nSaved to {} (reload matches: {})",
        store.root().display(),
        reloaded.as_ref() == Some(&*pool)
    );
    store.remove(&pool_address)?;

    Ok(())
}
