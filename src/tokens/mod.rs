//! Token ledgers usable as [`TokenLedger`](crate::traits::TokenLedger)s.

mod in_memory;

pub use in_memory::InMemoryToken;
