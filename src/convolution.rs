use std::collections::HashMap;

use fraction::{One, Zero};

use crate::{error::SumProbabilityError, sum_probability::validate, Count, Value};

type CountHashMap = HashMap<Value, Count>;

/// Counts the outcomes for every reachable sum by convolving `dice` uniform dice, one die at a time.
///
/// This is the brute-force counterpart of [`sum_probability`](crate::sum_probability): it touches
/// every pair of partial sum and face, `O(dice^2 * sides^2)` in total. Tuples are in ascending order (regarding sum).
pub fn count_by_convolution(
    dice: Value,
    sides: Value,
) -> Result<Vec<(Value, Count)>, SumProbabilityError> {
    validate(dice, 1, sides)?;
    let die: CountHashMap = (1..=sides).map(|face| (face, Count::one())).collect();
    let mut convoluted_h = CountHashMap::new();
    convoluted_h.insert(0, Count::one());
    for _ in 0..dice {
        convoluted_h = convolute_two_hashmaps(&convoluted_h, &die);
    }
    let mut counts: Vec<(Value, Count)> = convoluted_h.into_iter().collect();
    counts.sort_by_key(|e| e.0);
    Ok(counts)
}

fn convolute_two_hashmaps(h1: &CountHashMap, h2: &CountHashMap) -> CountHashMap {
    let mut m = CountHashMap::new();
    for (v1, c1) in h1.iter() {
        for (v2, c2) in h2.iter() {
            *m.entry(v1 + v2).or_insert_with(Count::zero) += c1 * c2;
        }
    }
    m
}
