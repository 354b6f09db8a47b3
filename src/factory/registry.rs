//! Asset → pool registry.

use std::collections::HashMap;

use tracing::{info, instrument};

use crate::config::ExchangeConfig;
use crate::domain::Address;
use crate::error::ExchangeError;
use crate::pools::ExchangePool;
use crate::traits::FromConfig;

/// Owns every pool, one per asset.
///
/// Assets are numbered from 1 in creation order; the number is stable for
/// the registry's lifetime and is what [`asset_with_id`](Self::asset_with_id)
/// looks up.
///
/// # Example
///
/// ```rust
/// use exchange_amm::config::ExchangeConfig;
/// use exchange_amm::domain::{Address, FeeTier};
/// use exchange_amm::factory::PoolRegistry;
///
/// let asset = Address::from_bytes([7u8; 32]);
/// let mut registry = PoolRegistry::new();
/// let pool = registry
///     .create_exchange(&ExchangeConfig::new(asset, FeeTier::default()).expect("valid"))
///     .expect("created");
///
/// assert_eq!(registry.token_count(), 1);
/// assert_eq!(registry.resolve_pool(&asset).expect("registered").address(), pool);
/// assert_eq!(registry.asset_for_pool(&pool), Some(asset));
/// assert_eq!(registry.asset_with_id(1), Some(asset));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PoolRegistry {
    pools: HashMap<Address, ExchangePool>,
    asset_by_pool: HashMap<Address, Address>,
    assets: Vec<Address>,
}

impl PoolRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty pool for `config.asset()` and returns its address.
    ///
    /// # Errors
    ///
    /// - Configuration errors from [`ExchangeConfig::validate`].
    /// - [`ExchangeError::PoolAlreadyExists`] if the asset already has a pool.
    /// - [`ExchangeError::InvalidConfiguration`] if the pool address is
    ///   already used by another pool.
    #[instrument(skip(self), fields(asset = %config.asset()))]
    pub fn create_exchange(&mut self, config: &ExchangeConfig) -> Result<Address, ExchangeError> {
        let pool = ExchangePool::from_config(config)?;
        let address = pool.address();
        self.insert_pool(pool)?;
        info!(pool = %address, count = self.assets.len(), "created exchange");
        Ok(address)
    }

    /// Registers an existing pool, typically one restored from storage.
    ///
    /// # Errors
    ///
    /// Same registration errors as [`create_exchange`](Self::create_exchange).
    pub fn insert_pool(&mut self, pool: ExchangePool) -> Result<(), ExchangeError> {
        let asset = pool.asset();
        let address = pool.address();
        if self.pools.contains_key(&asset) {
            return Err(ExchangeError::PoolAlreadyExists(asset));
        }
        if self.asset_by_pool.contains_key(&address) {
            return Err(ExchangeError::InvalidConfiguration(
                "pool address already in use",
            ));
        }
        self.pools.insert(asset, pool);
        self.asset_by_pool.insert(address, asset);
        self.assets.push(asset);
        Ok(())
    }

    /// The pool trading `asset`.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::PoolNotFound`] if none is registered.
    pub fn resolve_pool(&self, asset: &Address) -> Result<&ExchangePool, ExchangeError> {
        self.pools
            .get(asset)
            .ok_or(ExchangeError::PoolNotFound(*asset))
    }

    /// Mutable access to the pool trading `asset`.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::PoolNotFound`] if none is registered.
    pub fn resolve_pool_mut(
        &mut self,
        asset: &Address,
    ) -> Result<&mut ExchangePool, ExchangeError> {
        self.pools
            .get_mut(asset)
            .ok_or(ExchangeError::PoolNotFound(*asset))
    }

    /// Number of registered assets.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.assets.len()
    }

    /// The asset traded by the pool at `pool_address`.
    #[must_use]
    pub fn asset_for_pool(&self, pool_address: &Address) -> Option<Address> {
        self.asset_by_pool.get(pool_address).copied()
    }

    /// The asset registered `id`-th (1-based).
    #[must_use]
    pub fn asset_with_id(&self, id: usize) -> Option<Address> {
        id.checked_sub(1).and_then(|i| self.assets.get(i)).copied()
    }

    /// Pools in creation order.
    pub fn pools(&self) -> impl Iterator<Item = &ExchangePool> + '_ {
        self.assets.iter().filter_map(|a| self.pools.get(a))
    }
}
