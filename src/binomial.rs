use fraction::{One, Zero};

use crate::{Count, Value};

/// `a` choose `b`, extended to be 0 whenever `b < 0` or `b > a`.
///
/// Out-of-range arguments are ordinary input here: several terms of the
/// inclusion-exclusion sum land outside the natural domain and must contribute nothing.
///
/// # Examples
/// ```
/// use dice_sums::{binomial, Count};
///
/// assert_eq!(binomial(5, 2), Count::from(10u32));
/// assert_eq!(binomial(5, -1), Count::from(0u32));
/// assert_eq!(binomial(-3, -4), Count::from(0u32));
/// ```
pub fn binomial(a: Value, b: Value) -> Count {
    if b < 0 || b > a {
        return Count::zero();
    }
    let k = b.min(a - b) as u64;
    let a = a as u64;
    let mut acc = Count::one();
    // acc == C(a - k + j, j) after step j
    for j in 1..=k {
        acc *= a - k + j;
        acc /= j;
    }
    acc
}

/// `base^exponent` by repeated squaring
pub fn power(base: u64, exponent: u64) -> Count {
    let mut result = Count::one();
    let mut square = Count::from(base);
    let mut exponent = exponent;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result *= &square;
        }
        exponent >>= 1;
        if exponent > 0 {
            square = &square * &square;
        }
    }
    result
}
