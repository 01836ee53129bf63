//! Mixed-radix packing of bounded digits.
//!
//! Digit `i` has base `maxes[i]`; the first digit is the least
//! significant (little-endian), so
//! `code = Σ values[i] · ∏_{j<i} maxes[j]`.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Packs `values` into one integer below `∏ maxes`.
///
/// Requires `values[i] < maxes[i]`; only checked in debug builds, callers
/// validate at their own boundary.
pub fn flist_to_f<'a>(values: &[BigUint], maxes: impl IntoIterator<Item = &'a BigUint>) -> BigUint {
    let mut code = BigUint::zero();
    let mut multiplier = BigUint::one();
    for (value, max) in values.iter().zip(maxes) {
        debug_assert!(value < max, "digit {} exceeds its base {}", value, max);
        code += value * &multiplier;
        multiplier *= max;
    }
    code
}

/// Unpacks `length` digits from `code` by successive division.
///
/// `maxes` may be longer than `length` (an endless `repeat` is fine).
/// Requires `code < ∏ maxes[..length]`: larger codes leave a silently
/// dropped remainder.
pub fn f_to_flist<'a>(
    code: &BigUint,
    maxes: impl IntoIterator<Item = &'a BigUint>,
    length: usize,
) -> Vec<BigUint> {
    let mut rest = code.clone();
    let mut digits = Vec::with_capacity(length);
    for max in maxes.into_iter().take(length) {
        let (quotient, digit) = rest.div_rem(max);
        digits.push(digit);
        rest = quotient;
    }
    debug_assert!(digits.len() == length, "not enough bases for {} digits", length);
    digits
}

/// Number of codes a mixed-radix word with these bases can hold.
///
/// The empty product is 1.
pub fn radix_product<'a>(maxes: impl IntoIterator<Item = &'a BigUint>) -> BigUint {
    maxes.into_iter().fold(BigUint::one(), |acc, max| acc * max)
}
