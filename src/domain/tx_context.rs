//! Execution context of one pool transaction.

use super::{Address, Timestamp};

/// Who is executing an operation and when.
///
/// Every mutating pool operation runs inside one `TxContext`: the sender
/// owns the liquidity position being changed (or pays for the swap) and
/// the timestamp is what deadlines are checked against.  Build one per
/// logical transaction, typically from a [`Clock`](crate::traits::Clock).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxContext {
    sender: Address,
    timestamp: Timestamp,
}

impl TxContext {
    /// Creates a context for `sender` executing at `timestamp`.
    #[must_use]
    pub const fn new(sender: Address, timestamp: Timestamp) -> Self {
        Self { sender, timestamp }
    }

    /// The account executing the operation.
    #[must_use]
    pub const fn sender(&self) -> Address {
        self.sender
    }

    /// The transaction timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}
