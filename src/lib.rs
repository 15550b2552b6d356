//! Exact probabilities for the sum of `n` fair `d`-sided dice.
//!
//! The count of outcomes that add up to a sum `k` is evaluated with the closed-form
//! inclusion-exclusion identity instead of enumerating or convolving all `d^n` rolls:
//!
//! ```text
//! #(n, k, d) = Σ_{i=0}^{⌊(k-n)/d⌋} (-1)^i · C(n, i) · C(k - d·i - 1, k - d·i - n)
//! ```
//!
//! # Examples
//! ```
//! use dice_sums::{sum_probability, Count};
//!
//! let seven = sum_probability(2, 7, 6).unwrap();
//! assert_eq!(seven.numerator, Count::from(6u32));
//! assert_eq!(seven.denominator, Count::from(36u32));
//! ```
mod binomial;
mod convolution;
mod distribution;
mod error;
mod report;
mod sum_probability;

pub use binomial::{binomial, power};
pub use convolution::count_by_convolution;
pub use distribution::SumDistribution;
pub use error::SumProbabilityError;
pub use report::{format_line, format_summary, report_lines};
pub use sum_probability::{floor_div, sum_probability, validate, SumProbability};

/// dice counts, sides and sums
pub type Value = i64;
/// number of outcomes, arbitrary precision
pub type Count = fraction::BigUint;
/// exact probability
pub type Prob = fraction::BigFraction;
/// exact aggregate like mean or variance
pub type AggrValue = fraction::BigFraction;
