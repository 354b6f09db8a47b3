//! Exact integer arithmetic for reserve and share computations.
//!
//! - [`mul_div`] / [`product_cmp`]: 256-bit intermediates via `primitive-types`,
//!   with an explicit [`Rounding`](crate::domain::Rounding) on every quotient.
//! - [`CheckedArithmetic`]: `Result`-returning add/sub for `Amount` and `Shares`.

mod checked;
mod wide;

pub use checked::CheckedArithmetic;
pub use wide::{mul_div, mul_div_wide, narrow, product_cmp, wide};
