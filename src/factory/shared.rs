//! Registry shared across threads.
//!
//! The asset → pool map sits behind a `parking_lot::RwLock`; each pool has
//! its own `parking_lot::Mutex`, so operations on different pools never
//! contend and every operation on one pool runs with exclusive access to
//! it.  Nothing spans two pools atomically.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{info, instrument};

use crate::config::ExchangeConfig;
use crate::domain::Address;
use crate::error::ExchangeError;
use crate::pools::ExchangePool;
use crate::traits::FromConfig;

/// Handle to one pool inside a [`SharedRegistry`].
pub type PoolHandle = Arc<Mutex<ExchangePool>>;

#[derive(Debug, Default)]
struct Inner {
    pools: HashMap<Address, PoolHandle>,
    asset_by_pool: HashMap<Address, Address>,
    assets: Vec<Address>,
}

/// Thread-safe counterpart of [`PoolRegistry`](super::PoolRegistry).
///
/// Cloning is cheap and every clone sees the same pools.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<Inner>>,
}

impl SharedRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty pool for `config.asset()` and returns its address.
    ///
    /// # Errors
    ///
    /// Same as [`PoolRegistry::create_exchange`](super::PoolRegistry::create_exchange).
    #[instrument(skip(self), fields(asset = %config.asset()))]
    pub fn create_exchange(&self, config: &ExchangeConfig) -> Result<Address, ExchangeError> {
        let pool = ExchangePool::from_config(config)?;
        let address = pool.address();
        self.insert_pool(pool)?;
        info!(pool = %address, "created shared exchange");
        Ok(address)
    }

    /// Registers an existing pool.
    ///
    /// # Errors
    ///
    /// Same as [`PoolRegistry::insert_pool`](super::PoolRegistry::insert_pool).
    pub fn insert_pool(&self, pool: ExchangePool) -> Result<(), ExchangeError> {
        let asset = pool.asset();
        let address = pool.address();
        let mut inner = self.inner.write();
        if inner.pools.contains_key(&asset) {
            return Err(ExchangeError::PoolAlreadyExists(asset));
        }
        if inner.asset_by_pool.contains_key(&address) {
            return Err(ExchangeError::InvalidConfiguration(
                "pool address already in use",
            ));
        }
        inner.pools.insert(asset, Arc::new(Mutex::new(pool)));
        inner.asset_by_pool.insert(address, asset);
        inner.assets.push(asset);
        Ok(())
    }

    /// Handle to the pool trading `asset`.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::PoolNotFound`] if none is registered.
    pub fn resolve_pool(&self, asset: &Address) -> Result<PoolHandle, ExchangeError> {
        self.inner
            .read()
            .pools
            .get(asset)
            .cloned()
            .ok_or(ExchangeError::PoolNotFound(*asset))
    }

    /// Runs `f` with exclusive access to the pool trading `asset`.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::PoolNotFound`], or whatever `f` returns.
    pub fn with_pool<T>(
        &self,
        asset: &Address,
        f: impl FnOnce(&mut ExchangePool) -> Result<T, ExchangeError>,
    ) -> Result<T, ExchangeError> {
        let handle = self.resolve_pool(asset)?;
        let mut pool = handle.lock();
        f(&mut pool)
    }

    /// Number of registered assets.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.inner.read().assets.len()
    }

    /// The asset traded by the pool at `pool_address`.
    #[must_use]
    pub fn asset_for_pool(&self, pool_address: &Address) -> Option<Address> {
        self.inner.read().asset_by_pool.get(pool_address).copied()
    }

    /// The asset registered `id`-th (1-based).
    #[must_use]
    pub fn asset_with_id(&self, id: usize) -> Option<Address> {
        let inner = self.inner.read();
        id.checked_sub(1).and_then(|i| inner.assets.get(i)).copied()
    }

    /// Point-in-time copies of every pool, in creation order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ExchangePool> {
        let handles: Vec<PoolHandle> = {
            let inner = self.inner.read();
            inner
                .assets
                .iter()
                .filter_map(|a| inner.pools.get(a).cloned())
                .collect()
        };
        handles.iter().map(|h| h.lock().clone()).collect()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::thread;

    use super::*;
    use crate::domain::{Amount, DepositRequest, FeeTier, Shares, Timestamp, TxContext};
    use crate::traits::LiquidityPool;

    fn asset() -> Address {
        Address::from_bytes([7u8; 32])
    }

    fn registry_with_pool() -> SharedRegistry {
        let registry = SharedRegistry::new();
        let Ok(cfg) = ExchangeConfig::new(asset(), FeeTier::default()) else {
            panic!("valid config");
        };
        let Ok(_) = registry.create_exchange(&cfg) else {
            panic!("created");
        };
        registry
    }

    #[test]
    fn lookup_mirrors_plain_registry() {
        let registry = registry_with_pool();
        assert_eq!(registry.token_count(), 1);
        assert_eq!(registry.asset_with_id(1), Some(asset()));
        assert_eq!(registry.asset_for_pool(&Address::pool_for(&asset())), Some(asset()));
        assert!(registry.resolve_pool(&Address::from_bytes([1u8; 32])).is_err());
    }

    #[test]
    fn concurrent_deposits_are_serialised_per_pool() {
        let registry = registry_with_pool();
        let workers: Vec<_> = (1u8..=8)
            .map(|i| {
                let registry = registry.clone();
                thread::spawn(move || {
                    let ctx = TxContext::new(Address::from_bytes([i; 32]), Timestamp::new(0));
                    let req =
                        DepositRequest::new(Amount::new(100), Amount::new(100), Timestamp::NEVER);
                    registry.with_pool(&asset(), |pool| pool.add_liquidity(&ctx, &req))
                })
            })
            .collect();
        for w in workers {
            let Ok(Ok(_)) = w.join() else {
                panic!("deposit failed");
            };
        }
        let Ok(total) = registry.with_pool(&asset(), |pool| Ok(pool.total_shares())) else {
            panic!("registered");
        };
        assert_eq!(total, Shares::new(800));
        assert_eq!(registry.snapshot().len(), 1);
    }
}
