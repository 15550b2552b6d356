use std::ops::Add;

use fraction::{ToPrimitive, Zero};
use tracing::debug;

use crate::{
    error::SumProbabilityError,
    sum_probability::{sum_probability, validate},
    AggrValue, Count, Prob, Value,
};

/// A [`SumDistribution`] is the discrete probability distribution of the sum of `dice` fair dice with `sides` sides each,
/// together with parameters like mean, variance, median and mode.
///
/// Every probability comes from the closed-form count of [`sum_probability`], one reachable sum at a time.
/// The probabilities are of type [`BigFraction`](fraction::BigFraction) from the [`fraction`](fraction) crate,
/// so parameters like the mean are exact.
///
/// # Examples
/// ```
/// use dice_sums::SumDistribution;
///
/// let d = SumDistribution::new(2, 6).unwrap();
/// assert_eq!(d.mode, vec![7]);
/// assert_eq!(d.mean_f64(), 7.0);
/// ```
#[derive(Debug, Clone)]
pub struct SumDistribution {
    /// number of dice thrown
    pub dice: Value,
    /// number of sides of each die
    pub sides: Value,
    /// smallest reachable sum, `dice`
    pub min: Value,
    /// largest reachable sum, `dice * sides`
    pub max: Value,
    /// median of the probability distribution
    pub median: Value,
    /// mode or modes of the probability distribution, ascending
    pub mode: Vec<Value>,
    /// mean of the probability distribution
    pub mean: AggrValue,
    /// variance of the probability distribution
    pub variance: AggrValue,
    /// number of all outcomes, `sides^dice`
    pub total: Count,
    /// tuples of each reachable sum and the number of outcomes producing it, ascending by sum
    pub counts: Vec<(Value, Count)>,
    /// the probability mass function (pmf)
    ///
    /// tuples of each reachable sum and its probability in ascending order (regarding sum)
    pub distribution: Vec<(Value, Prob)>,
    /// the cumulative distribution function (cdf)
    ///
    /// tuples of each reachable sum and its cumulative probability in ascending order (regarding sum)
    pub cumulative_distribution: Vec<(Value, Prob)>,
}

impl SumDistribution {
    /// builds the distribution for `dice` dice with `sides` sides each
    ///
    /// this evaluates the inclusion-exclusion count for each of the `dice * (sides - 1) + 1` reachable sums.
    pub fn new(dice: Value, sides: Value) -> Result<SumDistribution, SumProbabilityError> {
        validate(dice, 1, sides)?;
        let max = dice
            .checked_mul(sides)
            .ok_or(SumProbabilityError::SumOverflow { dice, sides })?;
        let min = dice;

        let mut total = Count::zero();
        let mut counts: Vec<(Value, Count)> = vec![];
        let mut distribution: Vec<(Value, Prob)> = vec![];
        for sum in min..=max {
            let p = sum_probability(dice, sum, sides)?;
            distribution.push((sum, p.exact()));
            total = p.denominator;
            counts.push((sum, p.numerator));
        }

        let mut mean: AggrValue = AggrValue::from(0);
        let mut total_probability: Prob = Prob::new(0u64, 1u64);
        let median_prob: Prob = Prob::new(1u64, 2u64);
        let mut median: Option<Value> = None;
        let mut mode: Option<(Vec<Value>, Prob)> = None;

        for (val, prob) in distribution.iter().cloned() {
            mean += prob.clone() * Prob::from(val);
            total_probability += prob.clone();
            if median.is_none() && total_probability >= median_prob {
                median = Some(val);
            }
            let is_new_max = mode.as_ref().map_or(true, |(_, p)| prob > *p);
            if is_new_max {
                mode = Some((vec![val], prob));
            } else if let Some((vals, p)) = &mut mode {
                if prob == *p {
                    vals.push(val);
                }
            }
        }

        let mut variance: AggrValue = AggrValue::from(0);
        for (val, prob) in distribution.iter().cloned() {
            let val = AggrValue::from(val);
            let val_minus_mean = &val - &mean;
            let square = (&val_minus_mean) * (&val_minus_mean);
            variance += square * prob
        }

        // the support is never empty and its probabilities add up to 1
        let median = median.unwrap_or(max);
        let mode = mode.map(|m| m.0).unwrap_or_default();

        let cumulative_distribution = accumulated_distribution_from_distribution(&distribution);

        debug!(dice, sides, sums = counts.len(), "built sum distribution");

        Ok(SumDistribution {
            dice,
            sides,
            min,
            max,
            median,
            mode,
            mean,
            variance,
            total,
            counts,
            distribution,
            cumulative_distribution,
        })
    }

    /// exact probability of `sum`, 0 outside of `[min, max]`
    pub fn probability_of(&self, sum: Value) -> Prob {
        if sum < self.min || sum > self.max {
            return Prob::new(0u64, 1u64);
        }
        self.distribution[(sum - self.min) as usize].1.clone()
    }

    /// the mean as a float
    pub fn mean_f64(&self) -> f64 {
        self.mean.to_f64().unwrap_or(f64::NAN)
    }

    /// standard deviation as a float
    pub fn sd(&self) -> f64 {
        self.variance.to_f64().map_or(f64::NAN, f64::sqrt)
    }
}

fn accumulated_distribution_from_distribution(
    distribution: &[(Value, Prob)],
) -> Vec<(Value, Prob)> {
    let mut acc_distr: Vec<(Value, Prob)> = vec![];
    let mut last_acc_prob: Option<Prob> = None;
    for (val, prob) in distribution {
        let acc_p = match last_acc_prob {
            None => prob.clone(),
            Some(acc_p) => acc_p.add(prob.clone()),
        };
        last_acc_prob = Some(acc_p.clone());
        acc_distr.push((*val, acc_p));
    }
    acc_distr
}
