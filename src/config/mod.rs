//! Pool configuration.
//!
//! [`ExchangeConfig`] is the declarative blueprint the registry turns into
//! an [`ExchangePool`](crate::pools::ExchangePool).

mod exchange;

pub use exchange::ExchangeConfig;
