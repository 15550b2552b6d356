use fraction::{ToPrimitive, Zero};
use tracing::trace;

use crate::{
    binomial::{binomial, power},
    error::SumProbabilityError,
    Count, Prob, Value,
};

/// bit length above which a [`Count`] no longer converts to a finite `f64`
const F64_SAFE_BITS: u64 = 1000;

/// The chance of one particular sum when throwing fair dice.
///
/// `numerator` outcomes out of `denominator` equally likely ones produce the sum,
/// `probability` is their ratio as a float.
#[derive(Debug, Clone, PartialEq)]
pub struct SumProbability {
    /// number of outcomes adding up to the sum
    pub numerator: Count,
    /// number of all outcomes, `sides^dice`
    pub denominator: Count,
    /// `numerator / denominator`
    pub probability: f64,
}

impl SumProbability {
    /// the probability as an exact [`BigFraction`](fraction::BigFraction)
    pub fn exact(&self) -> Prob {
        Prob::new(self.numerator.clone(), self.denominator.clone())
    }
}

/// checks that the number of dice, the sum and the number of sides are all at least 1
pub fn validate(dice: Value, sum: Value, sides: Value) -> Result<(), SumProbabilityError> {
    if dice < 1 || sum < 1 || sides < 1 {
        return Err(SumProbabilityError::InvalidArgument { dice, sum, sides });
    }
    Ok(())
}

/// integer division rounding toward negative infinity
///
/// `/` on integers truncates toward zero, which is off by one for negative
/// non-exact quotients: `floor_div(-1, 6) == -1` while `-1 / 6 == 0`.
pub fn floor_div(a: Value, b: Value) -> Value {
    let q = a / b;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

/// Calculates the probability of rolling `sum` with `dice` fair dice of `sides` sides each.
///
/// The number of outcomes is the count of compositions of `sum` into `dice` parts
/// in `[1, sides]`, obtained by inclusion-exclusion over the parts exceeding `sides`.
/// Sums below `dice` or above `dice * sides` are valid input with a numerator of 0.
///
/// # Errors
/// [`SumProbabilityError::InvalidArgument`] if any argument is below 1.
///
/// # Examples
/// ```
/// use dice_sums::sum_probability;
///
/// let p = sum_probability(3, 10, 6).unwrap();
/// assert_eq!(p.probability, 0.125);
/// ```
pub fn sum_probability(
    dice: Value,
    sum: Value,
    sides: Value,
) -> Result<SumProbability, SumProbabilityError> {
    validate(dice, sum, sides)?;

    let denominator = power(sides as u64, dice as u64);
    // C(dice, i) vanishes for i > dice
    let i_max = floor_div(sum - dice, sides).min(dice);

    let mut added = Count::zero();
    let mut subtracted = Count::zero();
    for i in 0..=i_max {
        // i <= (sum - dice) / sides, so top >= dice >= 1
        let top = sum - sides * i;
        let term = binomial(dice, i) * binomial(top - 1, top - dice);
        if i % 2 == 0 {
            added += term;
        } else {
            subtracted += term;
        }
    }
    // the alternating sum counts outcomes and is never negative
    let numerator = added - subtracted;
    let probability = ratio_to_f64(&numerator, &denominator);

    trace!(dice, sum, sides, %numerator, %denominator, "evaluated sum probability");

    Ok(SumProbability {
        numerator,
        denominator,
        probability,
    })
}

/// `numer / denom` as `f64`, for `numer <= denom`
///
/// Approximate, not correctly rounded: past [`F64_SAFE_BITS`] both operands lose the same
/// low bits, so a ratio below about `2^-F64_SAFE_BITS` comes out as 0 even where a
/// subnormal `f64` could represent it.
fn ratio_to_f64(numer: &Count, denom: &Count) -> f64 {
    let excess = denom.bits().saturating_sub(F64_SAFE_BITS);
    let numer = numer >> excess;
    let denom = denom >> excess;
    numer
        .to_f64()
        .zip(denom.to_f64())
        .map_or(f64::NAN, |(n, d)| n / d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fraction::One;
    use proptest::prelude::*;

    fn numerator(dice: Value, sum: Value, sides: Value) -> Count {
        sum_probability(dice, sum, sides).unwrap().numerator
    }

    #[test]
    fn two_dice_sum_of_seven() {
        let p = sum_probability(2, 7, 6).unwrap();
        assert_eq!(p.numerator, Count::from(6u32));
        assert_eq!(p.denominator, Count::from(36u32));
        assert!((p.probability - 0.166667).abs() < 1e-6);
        assert_eq!(p.exact(), Prob::new(1u64, 6u64));
    }

    #[test]
    fn one_die_sum_of_three() {
        let p = sum_probability(1, 3, 6).unwrap();
        assert_eq!(p.numerator, Count::one());
        assert_eq!(p.denominator, Count::from(6u32));
        assert!((p.probability - 0.166667).abs() < 1e-6);
    }

    #[test]
    fn two_dice_snake_eyes() {
        let p = sum_probability(2, 2, 6).unwrap();
        assert_eq!(p.numerator, Count::one());
        assert_eq!(p.denominator, Count::from(36u32));
        assert!((p.probability - 0.027778).abs() < 1e-6);
    }

    #[test]
    fn unreachable_sum_above_range() {
        let p = sum_probability(2, 13, 6).unwrap();
        assert!(p.numerator.is_zero());
        assert_eq!(p.denominator, Count::from(36u32));
        assert_eq!(p.probability, 0.0);
    }

    #[test]
    fn unreachable_sum_below_range() {
        let p = sum_probability(3, 2, 6).unwrap();
        assert!(p.numerator.is_zero());
        assert_eq!(p.probability, 0.0);
    }

    #[test]
    fn three_dice_sum_of_ten() {
        let p = sum_probability(3, 10, 6).unwrap();
        assert_eq!(p.numerator, Count::from(27u32));
        assert_eq!(p.denominator, Count::from(216u32));
        assert_eq!(p.probability, 0.125);
    }

    #[test]
    fn one_sided_dice() {
        assert_eq!(numerator(5, 5, 1), Count::one());
        assert!(numerator(5, 6, 1).is_zero());
        assert!(numerator(5, 4, 1).is_zero());
    }

    #[test]
    fn far_above_range_stays_zero() {
        assert!(numerator(3, 1_000_000_000, 6).is_zero());
        assert!(numerator(1, Value::MAX, 1).is_zero());
    }

    #[test]
    fn zero_arguments_are_invalid() {
        assert_eq!(
            sum_probability(0, 7, 6),
            Err(SumProbabilityError::InvalidArgument {
                dice: 0,
                sum: 7,
                sides: 6
            })
        );
        assert!(sum_probability(2, 0, 6).is_err());
        assert!(sum_probability(2, 7, 0).is_err());
        assert!(sum_probability(-2, 7, 6).is_err());
    }

    #[test]
    fn floor_division_rounds_down() {
        assert_eq!(floor_div(7, 2), 3);
        assert_eq!(floor_div(-1, 6), -1);
        assert_eq!(floor_div(-6, 6), -1);
        assert_eq!(floor_div(-7, 6), -2);
        assert_eq!(floor_div(0, 6), 0);
        assert_eq!(floor_div(7, -2), -4);
    }

    #[test]
    fn probability_of_huge_denominator_is_finite() {
        // 6^1000 has about 2585 bits
        let p = sum_probability(1000, 3500, 6).unwrap();
        assert!(p.probability.is_finite());
        assert!(p.probability > 0.0 && p.probability < 1.0);
        let q = sum_probability(1000, 1000, 6).unwrap();
        assert_eq!(q.numerator, Count::one());
        assert_eq!(q.probability, 0.0);
    }

    #[test]
    fn ratio_beyond_safe_bits_is_approximate() {
        let denom = Count::one() << 1100usize;
        assert_eq!(ratio_to_f64(&(Count::one() << 1000usize), &denom), 2f64.powi(-100));
        assert_eq!(ratio_to_f64(&(Count::one() << 1060usize), &denom), 2f64.powi(-40));
        // 2^-1070 is a subnormal f64 but the numerator is shifted away entirely
        assert_eq!(ratio_to_f64(&(Count::one() << 30usize), &denom), 0.0);
        assert_eq!(ratio_to_f64(&Count::from(3u32), &Count::from(4u32)), 0.75);
    }

    proptest! {
        #[test]
        fn counts_add_up_to_all_outcomes(dice in 1i64..8, sides in 1i64..12) {
            let total = (dice..=dice * sides)
                .map(|k| numerator(dice, k, sides))
                .fold(Count::zero(), |acc, c| acc + c);
            prop_assert_eq!(total, power(sides as u64, dice as u64));
        }

        #[test]
        fn outside_support_is_zero(dice in 1i64..8, sides in 1i64..12, offset in 1i64..20) {
            if dice - offset >= 1 {
                prop_assert!(numerator(dice, dice - offset, sides).is_zero());
            }
            prop_assert!(numerator(dice, dice * sides + offset, sides).is_zero());
        }

        #[test]
        fn extremes_have_one_way(dice in 1i64..10, sides in 1i64..20) {
            prop_assert_eq!(numerator(dice, dice, sides), Count::one());
            prop_assert_eq!(numerator(dice, dice * sides, sides), Count::one());
        }

        #[test]
        fn symmetric_about_the_mean(dice in 1i64..8, sides in 1i64..12, pick in 0i64..1000) {
            let k = dice + pick % (dice * sides - dice + 1);
            prop_assert_eq!(
                numerator(dice, k, sides),
                numerator(dice, dice * (sides + 1) - k, sides)
            );
        }

        #[test]
        fn floor_div_matches_euclid_for_positive_divisor(a in -1000i64..1000, b in 1i64..50) {
            prop_assert_eq!(floor_div(a, b), a.div_euclid(b));
        }
    }
}
