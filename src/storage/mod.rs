//! Durable pool state.
//!
//! A [`PoolStore`] keeps one [`PoolRecord`] per pool, keyed by the pool's
//! account address.  [`FileStore`] writes crash-consistent JSON files;
//! [`MemoryStore`] keeps records in a map for tests and embedding hosts
//! that persist elsewhere.

mod file;
mod memory;
mod record;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use record::{PoolRecord, RECORD_VERSION};

use crate::domain::Address;
use crate::error::ExchangeError;
use crate::pools::ExchangePool;

/// Keyed storage for pool records.
pub trait PoolStore {
    /// Writes `pool`, replacing any earlier record for the same address.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::Storage`] or [`ExchangeError::Serialization`] if
    /// the record cannot be written; the previous record stays intact.
    fn save(&self, pool: &ExchangePool) -> Result<(), ExchangeError>;

    /// Reads the pool stored under `pool_address`, if any.
    ///
    /// # Errors
    ///
    /// Storage and decoding errors, plus whatever
    /// [`PoolRecord::into_pool`] rejects.
    fn load(&self, pool_address: &Address) -> Result<Option<ExchangePool>, ExchangeError>;

    /// Reads every stored pool, in pool-address order.
    ///
    /// # Errors
    ///
    /// The first error any record produces.
    fn load_all(&self) -> Result<Vec<ExchangePool>, ExchangeError>;

    /// Deletes the record for `pool_address`; returns whether one existed.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::Storage`] if the record cannot be removed.
    fn remove(&self, pool_address: &Address) -> Result<bool, ExchangeError>;
}
