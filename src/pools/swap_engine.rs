//! Constant-product pricing with the fee taken from the input.
//!
//! # Exact input
//!
//! ```text
//! out = ⌊ ry × in × (D − N) / (rx × D + in × (D − N)) ⌋
//! ```
//!
//! # Exact output
//!
//! ```text
//! in = ⌈ rx × out × D / ((ry − out) × (D − N)) ⌉
//! ```
//!
//! `N / D` is the fee (30 / 10 000 by default).  Both fractions are
//! evaluated in 256 bits, so nothing is truncated before the final
//! division; the caller still re-checks the reserve product on the result.

use primitive_types::U256;

use crate::domain::{Amount, FeeTier, Reserves, Rounding, SwapDirection, SwapResult, SwapSpec};
use crate::error::ExchangeError;
use crate::math::{mul_div_wide, wide};

/// Pricing for one pool's fee tier.
///
/// # Examples
///
/// ```
/// use exchange_amm::domain::{Amount, FeeTier};
/// use exchange_amm::pools::SwapEngine;
///
/// let engine = SwapEngine::new(FeeTier::default());
/// let out = engine.output_for(Amount::new(1_000), Amount::new(10_000), Amount::new(10_000));
/// assert_eq!(out.ok(), Some(Amount::new(906)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapEngine {
    fee: FeeTier,
}

impl SwapEngine {
    /// Engine charging `fee`.
    #[must_use]
    pub const fn new(fee: FeeTier) -> Self {
        Self { fee }
    }

    /// The fee tier.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee
    }

    /// Output bought by selling `amount_in` into `reserve_in`.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::ZeroAmount`] if `amount_in` is zero.
    /// - [`ExchangeError::InsufficientLiquidity`] if either reserve is
    ///   empty, or the output rounds to zero or would drain `reserve_out`.
    /// - [`ExchangeError::Overflow`] beyond 256-bit range.
    pub fn output_for(
        &self,
        amount_in: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
    ) -> Result<Amount, ExchangeError> {
        let out = self.floor_output(amount_in, reserve_in, reserve_out)?;
        ensure_payable(out, reserve_out)?;
        Ok(out)
    }

    /// The floored curve output, zero included.
    fn floor_output(
        &self,
        amount_in: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
    ) -> Result<Amount, ExchangeError> {
        if amount_in.is_zero() {
            return Err(ExchangeError::ZeroAmount("swap input must be non-zero"));
        }
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(ExchangeError::InsufficientLiquidity);
        }
        let d = U256::from(self.fee.denominator());
        let in_with_fee = wide(amount_in) * U256::from(self.fee.retained_numerator());
        let numerator = wide(reserve_out)
            .checked_mul(in_with_fee)
            .ok_or(ExchangeError::Overflow("swap output numerator overflow"))?;
        let denominator = wide(reserve_in) * d + in_with_fee;
        Ok(Amount::new(mul_div_wide(
            numerator,
            denominator,
            Rounding::owed_to_caller(),
        )?))
    }

    /// Input required to buy exactly `amount_out` from `reserve_out`.
    ///
    /// # Errors
    ///
    /// - [`ExchangeError::ZeroAmount`] if `amount_out` is zero.
    /// - [`ExchangeError::InsufficientLiquidity`] if `reserve_in` is empty
    ///   or `amount_out >= reserve_out`.
    /// - [`ExchangeError::Overflow`] if the input does not fit in `u128`.
    pub fn input_for(
        &self,
        amount_out: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
    ) -> Result<Amount, ExchangeError> {
        if amount_out.is_zero() {
            return Err(ExchangeError::ZeroAmount("swap output must be non-zero"));
        }
        if reserve_in.is_zero() || amount_out >= reserve_out {
            return Err(ExchangeError::InsufficientLiquidity);
        }
        let numerator = (wide(reserve_in) * wide(amount_out))
            .checked_mul(U256::from(self.fee.denominator()))
            .ok_or(ExchangeError::Overflow("swap input numerator overflow"))?;
        let remaining = reserve_out.get() - amount_out.get();
        let denominator = U256::from(remaining) * U256::from(self.fee.retained_numerator());
        Ok(Amount::new(mul_div_wide(
            numerator,
            denominator,
            Rounding::owed_to_pool(),
        )?))
    }

    /// Fee portion of `amount_in`, rounded up.
    ///
    /// # Errors
    ///
    /// Never fails for valid fee tiers; returns [`ExchangeError::Overflow`]
    /// otherwise.
    pub fn fee_for(&self, amount_in: Amount) -> Result<Amount, ExchangeError> {
        self.fee.fee_on(amount_in)
    }

    /// Prices a swap against `reserves` and enforces its slippage bound.
    ///
    /// # Errors
    ///
    /// The pricing errors of [`output_for`](Self::output_for) /
    /// [`input_for`](Self::input_for), plus
    /// [`ExchangeError::SlippageExceeded`] (exact input) or
    /// [`ExchangeError::ExcessiveInputAmount`] (exact output).
    ///
    /// The exact-input bound is checked against the floored output before
    /// the zero-output check, so an order asking for more than the curve
    /// gives fails with `SlippageExceeded` even when that output is 0.
    pub fn quote(
        &self,
        reserves: &Reserves,
        direction: SwapDirection,
        spec: SwapSpec,
    ) -> Result<SwapResult, ExchangeError> {
        let (reserve_in, reserve_out) = oriented(reserves, direction);
        let (amount_in, amount_out) = match spec {
            SwapSpec::ExactIn {
                amount_in,
                min_amount_out,
            } => {
                let out = self.floor_output(amount_in, reserve_in, reserve_out)?;
                if out < min_amount_out {
                    return Err(ExchangeError::SlippageExceeded {
                        what: "amount out",
                        actual: out.get(),
                        minimum: min_amount_out.get(),
                    });
                }
                ensure_payable(out, reserve_out)?;
                (amount_in, out)
            }
            SwapSpec::ExactOut {
                amount_out,
                max_amount_in,
            } => {
                let required = self.input_for(amount_out, reserve_in, reserve_out)?;
                if required > max_amount_in {
                    return Err(ExchangeError::ExcessiveInputAmount {
                        required,
                        allowed: max_amount_in,
                    });
                }
                (required, amount_out)
            }
        };
        SwapResult::new(direction, amount_in, amount_out, self.fee_for(amount_in)?)
    }
}

/// A zero output is never paid, and the output reserve is never emptied.
fn ensure_payable(out: Amount, reserve_out: Amount) -> Result<(), ExchangeError> {
    if out.is_zero() || out >= reserve_out {
        return Err(ExchangeError::InsufficientLiquidity);
    }
    Ok(())
}

/// `(reserve_in, reserve_out)` for a trade in `direction`.
#[must_use]
pub const fn oriented(reserves: &Reserves, direction: SwapDirection) -> (Amount, Amount) {
    match direction {
        SwapDirection::BaseToAsset => (reserves.base, reserves.asset),
        SwapDirection::AssetToBase => (reserves.asset, reserves.base),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{BasisPoints, Shares};

    fn engine() -> SwapEngine {
        SwapEngine::new(FeeTier::TIER_0_30_PERCENT)
    }

    fn a(v: u128) -> Amount {
        Amount::new(v)
    }

    // -- exact input --------------------------------------------------------

    #[test]
    fn output_matches_997_over_1000_formula() {
        // 10000 * 1000 * 9970 / (10000 * 10000 + 1000 * 9970) = 906.61...
        assert_eq!(engine().output_for(a(1_000), a(10_000), a(10_000)), Ok(a(906)));
    }

    #[test]
    fn zero_fee_output() {
        let e = SwapEngine::new(FeeTier::ZERO);
        // 100 * 25 / 125 = 20
        assert_eq!(e.output_for(a(25), a(100), a(100)), Ok(a(20)));
    }

    #[test]
    fn zero_input_is_zero_amount() {
        assert!(matches!(
            engine().output_for(Amount::ZERO, a(10), a(10)),
            Err(ExchangeError::ZeroAmount(_))
        ));
    }

    #[test]
    fn empty_reserve_is_insufficient_liquidity() {
        assert_eq!(
            engine().output_for(a(10), Amount::ZERO, a(10)),
            Err(ExchangeError::InsufficientLiquidity)
        );
    }

    #[test]
    fn output_rounding_to_zero_is_insufficient_liquidity() {
        assert_eq!(
            engine().output_for(a(1), a(1_000_000), a(10)),
            Err(ExchangeError::InsufficientLiquidity)
        );
    }

    #[test]
    fn no_intermediate_truncation_for_tiny_inputs() {
        // A truncated effective input of 1 * 9970 / 10000 = 0 would buy
        // nothing; the single fraction keeps it.
        assert_eq!(engine().output_for(a(1), a(5), a(5_000)), Ok(a(831)));
    }

    #[test]
    fn huge_reserves_do_not_overflow_u128() {
        let big = a(1u128 << 100);
        let Ok(out) = engine().output_for(a(1u128 << 99), big, big) else {
            panic!("256-bit intermediates");
        };
        assert!(out < big);
    }

    // -- exact output -------------------------------------------------------

    #[test]
    fn input_for_rounds_up() {
        // 10000 * 906 * 10000 / (9094 * 9970) = 999.26... -> 1000
        assert_eq!(engine().input_for(a(906), a(10_000), a(10_000)), Ok(a(1_000)));
    }

    #[test]
    fn input_for_whole_reserve_is_insufficient_liquidity() {
        assert_eq!(
            engine().input_for(a(10), a(10), a(10)),
            Err(ExchangeError::InsufficientLiquidity)
        );
    }

    #[test]
    fn exact_output_round_trip_never_undercharges() {
        let e = engine();
        for out in [1u128, 7, 250, 4_999] {
            let Ok(input) = e.input_for(a(out), a(5_000), a(5_000)) else {
                panic!("quotable");
            };
            let Ok(bought) = e.output_for(input, a(5_000), a(5_000)) else {
                panic!("quotable");
            };
            assert!(bought >= a(out), "paid {input} for {bought} < {out}");
        }
    }

    // -- quote --------------------------------------------------------------

    fn reserves() -> Reserves {
        Reserves::new(a(10_000), a(10_000), Shares::new(10_000))
    }

    #[test]
    fn quote_enforces_min_output() {
        let Ok(spec) = SwapSpec::exact_in(a(1_000), a(907)) else {
            panic!("valid spec");
        };
        assert_eq!(
            engine().quote(&reserves(), SwapDirection::BaseToAsset, spec),
            Err(ExchangeError::SlippageExceeded {
                what: "amount out",
                actual: 906,
                minimum: 907,
            })
        );
    }

    #[test]
    fn min_output_above_a_zero_output_is_slippage() {
        let thin = Reserves::new(a(1_000_000), a(10), Shares::new(1_000_000));
        let Ok(bounded) = SwapSpec::exact_in(a(1), a(1)) else {
            panic!("valid spec");
        };
        assert_eq!(
            engine().quote(&thin, SwapDirection::BaseToAsset, bounded),
            Err(ExchangeError::SlippageExceeded {
                what: "amount out",
                actual: 0,
                minimum: 1,
            })
        );
        let Ok(unbounded) = SwapSpec::exact_in(a(1), Amount::ZERO) else {
            panic!("valid spec");
        };
        assert_eq!(
            engine().quote(&thin, SwapDirection::BaseToAsset, unbounded),
            Err(ExchangeError::InsufficientLiquidity)
        );
    }

    #[test]
    fn quote_enforces_max_input() {
        let Ok(spec) = SwapSpec::exact_out(a(906), a(999)) else {
            panic!("valid spec");
        };
        assert_eq!(
            engine().quote(&reserves(), SwapDirection::AssetToBase, spec),
            Err(ExchangeError::ExcessiveInputAmount {
                required: a(1_000),
                allowed: a(999),
            })
        );
    }

    #[test]
    fn quote_reports_fee_rounded_up() {
        let Ok(spec) = SwapSpec::exact_in(a(1_000), Amount::ZERO) else {
            panic!("valid spec");
        };
        let Ok(r) = engine().quote(&reserves(), SwapDirection::BaseToAsset, spec) else {
            panic!("quotable");
        };
        assert_eq!(r.fee(), a(3));
        assert_eq!(r.amount_out(), a(906));
        let e = SwapEngine::new(FeeTier::new(BasisPoints::new(1)));
        assert_eq!(e.fee_for(a(1)), Ok(a(1)));
    }

    #[test]
    fn oriented_follows_direction() {
        let r = Reserves::new(a(1), a(2), Shares::new(1));
        assert_eq!(oriented(&r, SwapDirection::BaseToAsset), (a(1), a(2)));
        assert_eq!(oriented(&r, SwapDirection::AssetToBase), (a(2), a(1)));
    }
}
