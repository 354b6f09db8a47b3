//! Chain-agnostic 32-byte identity for accounts, assets and pools.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ExchangeError;

/// Domain tag mixed into pool-address derivation.
const POOL_ADDRESS_DOMAIN: &[u8] = b"exchange-amm/pool/v1";

/// A 32-byte identity.
///
/// The same type names liquidity providers and traders, the paired asset a
/// pool trades, and the pool's own account inside the transfer ledgers.
/// All byte sequences are valid, so construction is infallible.  The
/// textual form (`Display`, `FromStr`, serde) is lowercase hex.
///
/// # Examples
///
/// ```
/// use exchange_amm::domain::Address;
///
/// let asset = Address::from_bytes([7u8; 32]);
/// let pool = Address::pool_for(&asset);
/// assert_ne!(pool, asset);
/// assert_eq!(pool, Address::pool_for(&asset));
///
/// let parsed: Address = asset.to_string().parse().expect("valid hex");
/// assert_eq!(parsed, asset);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; 32]);

impl Address {
    /// Wraps raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// The all-zero address.
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Deterministic pool account for `asset`.
    ///
    /// Every registry derives the same pool address for the same asset,
    /// so persisted records and ledger balances stay addressable across
    /// restarts.
    #[must_use]
    pub fn pool_for(asset: &Self) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(POOL_ADDRESS_DOMAIN);
        hasher.update(&asset.0);
        Self(*hasher.finalize().as_bytes())
    }

    /// Lowercase hex encoding, 64 characters.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Address {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = hex::decode(s.trim_start_matches("0x"))
            .map_err(|e| ExchangeError::Serialization(format!("invalid address hex: {e}")))?;
        let bytes: [u8; 32] = raw.try_into().map_err(|v: Vec<u8>| {
            ExchangeError::Serialization(format!("address must be 32 bytes, got {}", v.len()))
        })?;
        Ok(Self(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
