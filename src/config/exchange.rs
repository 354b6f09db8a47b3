//! Configuration for one base/asset exchange pool.

use serde::{Deserialize, Serialize};

use crate::domain::{Address, FeeTier};
use crate::error::ExchangeError;

/// Immutable parameters of an exchange pool.
///
/// A pool trades base currency against `asset`, charges `fee_tier` on every
/// swap input, and holds its balances under `pool_address` in the transfer
/// ledgers.  When no pool address is given, one is derived from the asset
/// with [`Address::pool_for`].
///
/// Deserializable so hosts can keep pool definitions in JSON; the fee
/// defaults to 30 bp when omitted.  Use [`from_json`](Self::from_json) to
/// deserialize and validate in one step.
///
/// # Examples
///
/// ```
/// use exchange_amm::config::ExchangeConfig;
/// use exchange_amm::domain::{Address, FeeTier};
///
/// let asset = Address::from_bytes([7u8; 32]);
/// let cfg = ExchangeConfig::new(asset, FeeTier::default()).expect("valid config");
/// assert_eq!(cfg.pool_address(), Address::pool_for(&asset));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExchangeConfig {
    asset: Address,
    #[serde(default)]
    fee_tier: FeeTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pool_address: Option<Address>,
}

impl ExchangeConfig {
    /// Creates a config with a derived pool address.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn new(asset: Address, fee_tier: FeeTier) -> Result<Self, ExchangeError> {
        let config = Self {
            asset,
            fee_tier,
            pool_address: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Overrides the derived pool address.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn with_pool_address(mut self, pool_address: Address) -> Result<Self, ExchangeError> {
        self.pool_address = Some(pool_address);
        self.validate()?;
        Ok(self)
    }

    /// Parses and validates a JSON pool definition.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::Serialization`] for malformed JSON, otherwise the
    /// errors of [`validate`](Self::validate).
    pub fn from_json(text: &str) -> Result<Self, ExchangeError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every configuration invariant.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::InvalidConfiguration`] for a zero asset or pool
    ///   address, or a pool address equal to the asset.
    /// - [`ExchangeError::InvalidFee`] for a fee of 100% or more.
    pub fn validate(&self) -> Result<(), ExchangeError> {
        if self.asset == Address::zero() {
            return Err(ExchangeError::InvalidConfiguration(
                "asset address must be non-zero",
            ));
        }
        self.fee_tier.validate()?;
        if let Some(pool) = self.pool_address {
            if pool == Address::zero() {
                return Err(ExchangeError::InvalidConfiguration(
                    "pool address must be non-zero",
                ));
            }
            if pool == self.asset {
                return Err(ExchangeError::InvalidConfiguration(
                    "pool address must differ from the asset",
                ));
            }
        }
        Ok(())
    }

    /// The paired asset.
    #[must_use]
    pub const fn asset(&self) -> Address {
        self.asset
    }

    /// Swap fee.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// The pool's account in the transfer ledgers.
    #[must_use]
    pub fn pool_address(&self) -> Address {
        self.pool_address
            .unwrap_or_else(|| Address::pool_for(&self.asset))
    }
}
