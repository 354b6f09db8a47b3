//! In-memory [`PoolStore`].

use std::collections::BTreeMap;

use parking_lot::RwLock;
use tracing::debug;

use super::{PoolRecord, PoolStore};
use crate::domain::Address;
use crate::error::ExchangeError;
use crate::pools::ExchangePool;

/// Records held in a map behind a read-write lock.
///
/// Records go through the same snapshot and validation path as
/// [`FileStore`](super::FileStore), minus the encoding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<Address, PoolRecord>>,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// `true` when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl PoolStore for MemoryStore {
    fn save(&self, pool: &ExchangePool) -> Result<(), ExchangeError> {
        let record = PoolRecord::from_pool(pool);
        debug!(pool = %record.pool_address(), "storing pool record");
        self.records.write().insert(record.pool_address(), record);
        Ok(())
    }

    fn load(&self, pool_address: &Address) -> Result<Option<ExchangePool>, ExchangeError> {
        self.records
            .read()
            .get(pool_address)
            .cloned()
            .map(PoolRecord::into_pool)
            .transpose()
    }

    fn load_all(&self) -> Result<Vec<ExchangePool>, ExchangeError> {
        self.records
            .read()
            .values()
            .cloned()
            .map(PoolRecord::into_pool)
            .collect()
    }

    fn remove(&self, pool_address: &Address) -> Result<bool, ExchangeError> {
        Ok(self.records.write().remove(pool_address).is_some())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::config::ExchangeConfig;
    use crate::domain::FeeTier;
    use crate::traits::FromConfig;

    fn pool(asset: u8) -> ExchangePool {
        let Ok(cfg) = ExchangeConfig::new(Address::from_bytes([asset; 32]), FeeTier::default())
        else {
            panic!("valid config");
        };
        let Ok(pool) = ExchangePool::from_config(&cfg) else {
            panic!("valid pool");
        };
        pool
    }

    #[test]
    fn save_load_remove() {
        let store = MemoryStore::new();
        let p = pool(7);
        let Ok(()) = store.save(&p) else {
            panic!("save ok");
        };
        assert_eq!(store.len(), 1);
        assert_eq!(store.load(&p.address()), Ok(Some(p.clone())));
        assert_eq!(store.remove(&p.address()), Ok(true));
        assert_eq!(store.remove(&p.address()), Ok(false));
        assert_eq!(store.load(&p.address()), Ok(None));
        assert!(store.is_empty());
    }

    #[test]
    fn save_replaces_and_load_all_lists_every_pool() {
        let store = MemoryStore::new();
        for asset in [3u8, 9, 3] {
            let Ok(()) = store.save(&pool(asset)) else {
                panic!("save ok");
            };
        }
        let Ok(all) = store.load_all() else {
            panic!("load ok");
        };
        assert_eq!(all.len(), 2);
    }
}
