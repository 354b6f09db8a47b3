//! Pool registries.
//!
//! [`PoolRegistry`] owns every pool and maps each asset to exactly one;
//! [`SharedRegistry`] is the same map for multi-threaded hosts, with one
//! lock per pool.

mod registry;
mod shared;

pub use registry::PoolRegistry;
pub use shared::{PoolHandle, SharedRegistry};
