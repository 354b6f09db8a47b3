//! Deposit and withdrawal share math.
//!
//! [`LiquidityManager`] is pure: it reads a [`Reserves`] snapshot and
//! returns what a deposit or withdrawal would move, without touching any
//! state.  The pool applies the plan through the reserve ledger.
//!
//! # Formulas
//!
//! With base reserve `B`, asset reserve `A` and share supply `S`:
//!
//! ```text
//! empty pool:   shares = base,            asset = max_asset
//! funded pool:  asset  = ⌈base × A / B⌉,  shares = ⌊base × S / B⌋
//! withdrawal:   base   = ⌊s × B / S⌋,     asset  = ⌊s × A / S⌋
//! ```

use tracing::debug;

use crate::domain::{
    Amount, Deposit, DepositRequest, Reserves, Rounding, Shares, Timestamp, WithdrawRequest,
    Withdrawal,
};
use crate::error::ExchangeError;
use crate::math::mul_div;

/// Pure share-issuance calculator.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiquidityManager;

impl LiquidityManager {
    /// Plans a deposit against `reserves` at time `now`.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::DeadlineExpired`] if `now` is past the deadline.
    /// - [`ExchangeError::ZeroAmount`] for a zero base amount, a zero asset
    ///   amount into an empty pool, or a deposit that would mint no shares.
    /// - [`ExchangeError::ExcessiveInputAmount`] if the asset required
    ///   exceeds `max_asset_amount`.
    /// - [`ExchangeError::SlippageExceeded`] below `min_shares`.
    pub fn plan_deposit(
        reserves: &Reserves,
        request: &DepositRequest,
        now: Timestamp,
    ) -> Result<Deposit, ExchangeError> {
        request.deadline().ensure_not_expired(now)?;
        let base_in = request.base_amount();
        if base_in.is_zero() {
            return Err(ExchangeError::ZeroAmount("deposit base amount must be non-zero"));
        }

        let deposit = if reserves.total_shares.is_zero() {
            let asset_in = request.max_asset_amount();
            if asset_in.is_zero() {
                return Err(ExchangeError::ZeroAmount(
                    "initial deposit must include the asset",
                ));
            }
            Deposit {
                base_in,
                asset_in,
                shares_issued: Shares::new(base_in.get()),
            }
        } else {
            let asset_in = Amount::new(mul_div(
                base_in.get(),
                reserves.asset.get(),
                reserves.base.get(),
                Rounding::owed_to_pool(),
            )?);
            if asset_in > request.max_asset_amount() {
                return Err(ExchangeError::ExcessiveInputAmount {
                    required: asset_in,
                    allowed: request.max_asset_amount(),
                });
            }
            let shares_issued = Shares::new(mul_div(
                base_in.get(),
                reserves.total_shares.get(),
                reserves.base.get(),
                Rounding::owed_to_caller(),
            )?);
            if shares_issued.is_zero() {
                return Err(ExchangeError::ZeroAmount("deposit too small to mint a share"));
            }
            Deposit {
                base_in,
                asset_in,
                shares_issued,
            }
        };

        if deposit.shares_issued < request.min_shares() {
            return Err(ExchangeError::SlippageExceeded {
                what: "shares issued",
                actual: deposit.shares_issued.get(),
                minimum: request.min_shares().get(),
            });
        }
        debug!(%reserves, %deposit, "planned deposit");
        Ok(deposit)
    }

    /// Plans a withdrawal of shares currently `held` by the caller.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::DeadlineExpired`] if `now` is past the deadline.
    /// - [`ExchangeError::ZeroAmount`] for zero shares.
    /// - [`ExchangeError::InsufficientShares`] if `held` is too small.
    /// - [`ExchangeError::SlippageExceeded`] below either minimum.
    pub fn plan_withdrawal(
        reserves: &Reserves,
        held: Shares,
        request: &WithdrawRequest,
        now: Timestamp,
    ) -> Result<Withdrawal, ExchangeError> {
        request.deadline().ensure_not_expired(now)?;
        let shares = request.shares();
        if shares.is_zero() {
            return Err(ExchangeError::ZeroAmount("shares to burn must be non-zero"));
        }
        if held < shares {
            return Err(ExchangeError::InsufficientShares {
                held,
                requested: shares,
            });
        }
        if shares > reserves.total_shares {
            return Err(ExchangeError::InvalidStateTransition(
                "position exceeds the share supply",
            ));
        }

        let supply = reserves.total_shares.get();
        let base_out = Amount::new(mul_div(
            shares.get(),
            reserves.base.get(),
            supply,
            Rounding::owed_to_caller(),
        )?);
        let asset_out = Amount::new(mul_div(
            shares.get(),
            reserves.asset.get(),
            supply,
            Rounding::owed_to_caller(),
        )?);

        if base_out < request.min_base_out() {
            return Err(ExchangeError::SlippageExceeded {
                what: "base out",
                actual: base_out.get(),
                minimum: request.min_base_out().get(),
            });
        }
        if asset_out < request.min_asset_out() {
            return Err(ExchangeError::SlippageExceeded {
                what: "asset out",
                actual: asset_out.get(),
                minimum: request.min_asset_out().get(),
            });
        }
        let withdrawal = Withdrawal {
            base_out,
            asset_out,
            shares_burned: shares,
        };
        debug!(%reserves, %withdrawal, "planned withdrawal");
        Ok(withdrawal)
    }
}
