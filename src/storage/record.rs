//! The persisted shape of one pool.

use serde::{Deserialize, Serialize};

use crate::config::ExchangeConfig;
use crate::domain::{Address, Reserves};
use crate::error::ExchangeError;
use crate::pools::{ExchangePool, LiquidityPosition};
use crate::traits::SwapPool;

/// Current record format.
pub const RECORD_VERSION: u32 = 1;

/// Everything needed to restore an [`ExchangePool`].
///
/// Records carry a format version; loading a record written by a newer
/// format fails instead of guessing.  Reserves and positions are checked
/// again on the way back in, so a hand-edited or truncated record cannot
/// produce a pool that breaks its own invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolRecord {
    /// Format version, [`RECORD_VERSION`] when written by this crate.
    pub version: u32,
    /// Pool configuration.
    pub config: ExchangeConfig,
    /// Reserves and share supply.
    pub reserves: Reserves,
    /// Open positions, in owner order.
    pub positions: Vec<LiquidityPosition>,
}

impl PoolRecord {
    /// Snapshots `pool`.
    #[must_use]
    pub fn from_pool(pool: &ExchangePool) -> Self {
        Self {
            version: RECORD_VERSION,
            config: *pool.config(),
            reserves: pool.current_reserves(),
            positions: pool.positions().collect(),
        }
    }

    /// Account address of the recorded pool.
    #[must_use]
    pub fn pool_address(&self) -> Address {
        self.config.pool_address()
    }

    /// Rebuilds the pool.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::Serialization`] for an unknown version.
    /// - Whatever [`ExchangePool::from_parts`] rejects.
    pub fn into_pool(self) -> Result<ExchangePool, ExchangeError> {
        if self.version != RECORD_VERSION {
            return Err(ExchangeError::Serialization(format!(
                "unsupported pool record version {} (expected {RECORD_VERSION})",
                self.version
            )));
        }
        ExchangePool::from_parts(self.config, self.reserves, self.positions)
    }

    /// Encodes as pretty JSON.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::Serialization`] if encoding fails.
    pub fn to_json(&self) -> Result<Vec<u8>, ExchangeError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    /// Decodes from JSON.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::Serialization`] if `bytes` is not a record.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ExchangeError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Amount, DepositRequest, FeeTier, Shares, Timestamp, TxContext};
    use crate::traits::{FromConfig, LiquidityPool};

    fn funded_pool() -> ExchangePool {
        let Ok(cfg) = ExchangeConfig::new(Address::from_bytes([7u8; 32]), FeeTier::default())
        else {
            panic!("valid config");
        };
        let Ok(mut pool) = ExchangePool::from_config(&cfg) else {
            panic!("valid pool");
        };
        let ctx = TxContext::new(Address::from_bytes([1u8; 32]), Timestamp::new(10));
        let req = DepositRequest::new(Amount::new(500), Amount::new(800), Timestamp::new(20));
        let Ok(_) = pool.add_liquidity(&ctx, &req) else {
            panic!("deposit ok");
        };
        pool
    }

    #[test]
    fn record_restores_the_same_pool() {
        let pool = funded_pool();
        let record = PoolRecord::from_pool(&pool);
        assert_eq!(record.version, RECORD_VERSION);
        assert_eq!(record.positions.len(), 1);
        let Ok(json) = record.to_json() else {
            panic!("encodes");
        };
        let Ok(back) = PoolRecord::from_json(&json) else {
            panic!("decodes");
        };
        assert_eq!(back.into_pool(), Ok(pool));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let mut record = PoolRecord::from_pool(&funded_pool());
        record.version = RECORD_VERSION + 1;
        assert!(matches!(
            record.into_pool(),
            Err(ExchangeError::Serialization(_))
        ));
    }

    #[test]
    fn tampered_supply_is_rejected() {
        let mut record = PoolRecord::from_pool(&funded_pool());
        record.reserves.total_shares = Shares::new(501);
        assert!(matches!(
            record.into_pool(),
            Err(ExchangeError::InvalidStateTransition(_))
        ));
    }

    #[test]
    fn garbage_is_a_serialization_error() {
        assert!(matches!(
            PoolRecord::from_json(b"{\"version\":1}"),
            Err(ExchangeError::Serialization(_))
        ));
    }
}
