use crate::{
    distribution::SumDistribution,
    error::SumProbabilityError,
    sum_probability::{sum_probability, validate, SumProbability},
    Value,
};

/// one line of the report for the probability of `sum`
///
/// ```
/// use dice_sums::{format_line, sum_probability};
///
/// let line = format_line(7, 2, 6, &sum_probability(2, 7, 6).unwrap());
/// assert_eq!(
///     line,
///     "P(Sum of  7  when throwing 2 dice with 6 sides each) = 0.166667,  6  ways out of a total of 36 ways"
/// );
/// ```
pub fn format_line(sum: Value, dice: Value, sides: Value, result: &SumProbability) -> String {
    format!(
        "P(Sum of {sum:^3} when throwing {dice} dice with {sides} sides each) = {:.6}, {:^3} ways out of a total of {} ways",
        result.probability, result.numerator, result.denominator
    )
}

/// the report lines for every sum from 1 up to `max_sum`
///
/// All three inputs are validated before the first sum is evaluated, so a `max_sum` below 1
/// is reported as an error rather than producing an empty report.
pub fn report_lines(
    dice: Value,
    max_sum: Value,
    sides: Value,
) -> Result<Vec<String>, SumProbabilityError> {
    validate(dice, max_sum, sides)?;
    (1..=max_sum)
        .map(|sum| {
            let result = sum_probability(dice, sum, sides)?;
            Ok(format_line(sum, dice, sides, &result))
        })
        .collect()
}

/// mean, standard deviation, median and mode of the sum in one line
pub fn format_summary(distribution: &SumDistribution) -> String {
    let mode = distribution
        .mode
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<String>>()
        .join(",");
    format!(
        "Sum of {} dice with {} sides each: mean = {:.6}, sd = {:.6}, median = {}, mode = {}",
        distribution.dice,
        distribution.sides,
        distribution.mean_f64(),
        distribution.sd(),
        distribution.median,
        mode
    )
}
