//! Swap requests: direction, amount constraint, bounds and deadline.

use core::fmt;

use super::{Address, Amount, Timestamp};
use crate::error::ExchangeError;

/// Which reserve a swap sells into and which it buys from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SwapDirection {
    /// Sell base currency, buy the paired asset.
    BaseToAsset = 0,
    /// Sell the paired asset, buy base currency.
    AssetToBase = 1,
}

impl SwapDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn reversed(&self) -> Self {
        match self {
            Self::BaseToAsset => Self::AssetToBase,
            Self::AssetToBase => Self::BaseToAsset,
        }
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BaseToAsset => write!(f, "base->asset"),
            Self::AssetToBase => write!(f, "asset->base"),
        }
    }
}

/// What the caller fixes and what slippage bound protects the other side.
///
/// # Invariants
///
/// The fixed amount is non-zero when built through
/// [`exact_in`](Self::exact_in) / [`exact_out`](Self::exact_out).  The
/// variants are public, so the pool re-checks on execution.
///
/// # Examples
///
/// ```
/// use exchange_amm::domain::{Amount, SwapSpec};
///
/// let spec = SwapSpec::exact_in(Amount::new(1_000), Amount::new(900));
/// assert!(spec.is_ok());
/// assert!(SwapSpec::exact_in(Amount::ZERO, Amount::ZERO).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapSpec {
    /// Sell exactly `amount_in`; receive at least `min_amount_out`.
    ExactIn {
        /// Input sold.
        amount_in: Amount,
        /// Slippage bound on the output.
        min_amount_out: Amount,
    },
    /// Buy exactly `amount_out`; pay at most `max_amount_in`.
    ExactOut {
        /// Output bought.
        amount_out: Amount,
        /// Bound on the input the pool may charge.
        max_amount_in: Amount,
    },
}

impl SwapSpec {
    /// Exact-input swap.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::ZeroAmount`] if `amount_in` is zero.
    pub const fn exact_in(
        amount_in: Amount,
        min_amount_out: Amount,
    ) -> crate::error::Result<Self> {
        if amount_in.is_zero() {
            return Err(ExchangeError::ZeroAmount("swap input must be non-zero"));
        }
        Ok(Self::ExactIn {
            amount_in,
            min_amount_out,
        })
    }

    /// Exact-output swap.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::ZeroAmount`] if `amount_out` is zero.
    pub const fn exact_out(
        amount_out: Amount,
        max_amount_in: Amount,
    ) -> crate::error::Result<Self> {
        if amount_out.is_zero() {
            return Err(ExchangeError::ZeroAmount("swap output must be non-zero"));
        }
        Ok(Self::ExactOut {
            amount_out,
            max_amount_in,
        })
    }

    /// `true` for exact-input swaps.
    #[must_use]
    pub const fn is_exact_in(&self) -> bool {
        matches!(self, Self::ExactIn { .. })
    }

    /// The amount the caller fixed.
    pub const fn fixed_amount(&self) -> Amount {
        match self {
            Self::ExactIn { amount_in, .. } => *amount_in,
            Self::ExactOut { amount_out, .. } => *amount_out,
        }
    }
}

impl fmt::Display for SwapSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExactIn {
                amount_in,
                min_amount_out,
            } => write!(f, "ExactIn({amount_in}, min_out={min_amount_out})"),
            Self::ExactOut {
                amount_out,
                max_amount_in,
            } => write!(f, "ExactOut({amount_out}, max_in={max_amount_in})"),
        }
    }
}

/// A complete swap request against one pool.
///
/// The output goes to the sender unless [`to`](Self::to) names another
/// recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapOrder {
    direction: SwapDirection,
    spec: SwapSpec,
    deadline: Timestamp,
    recipient: Option<Address>,
}

impl SwapOrder {
    /// Creates an order paying the output to the sender.
    #[must_use]
    pub const fn new(direction: SwapDirection, spec: SwapSpec, deadline: Timestamp) -> Self {
        Self {
            direction,
            spec,
            deadline,
            recipient: None,
        }
    }

    /// Redirects the output to `recipient`.
    #[must_use]
    pub const fn to(mut self, recipient: Address) -> Self {
        self.recipient = Some(recipient);
        self
    }

    /// Trade direction.
    #[must_use]
    pub const fn direction(&self) -> SwapDirection {
        self.direction
    }

    /// Amount constraint and slippage bound.
    #[must_use]
    pub const fn spec(&self) -> SwapSpec {
        self.spec
    }

    /// Deadline for execution.
    #[must_use]
    pub const fn deadline(&self) -> Timestamp {
        self.deadline
    }

    /// Explicit recipient, if any.
    #[must_use]
    pub const fn recipient(&self) -> Option<Address> {
        self.recipient
    }
}
