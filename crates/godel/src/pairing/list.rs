//! Fixed-length tuples of naturals via the combinatorial number system.
//!
//! A tuple `(x_0, …, x_{k-1})` is first turned into the strictly
//! increasing sequence `s_i = x_0 + … + x_i + i`, which is then ranked as
//! a k-subset: `rank = Σ C(s_i, i + 1)`. Tuple order is preserved; the
//! tuple is never sorted.

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Binomial coefficient `C(m, k)`, zero when `m < k`.
pub fn binomial(m: &BigUint, k: usize) -> BigUint {
    if k == 0 {
        return BigUint::one();
    }
    if *m < BigUint::from(k) {
        return BigUint::zero();
    }
    // After step i the accumulator is C(m, i + 1), so every division is exact.
    let mut result = BigUint::one();
    for i in 0..k {
        result *= m - BigUint::from(i);
        result /= BigUint::from(i + 1);
    }
    result
}

/// Prefix transform: tuple to strictly increasing sequence.
pub fn ilist_to_iset(xs: &[BigUint]) -> Vec<BigUint> {
    let mut set = Vec::with_capacity(xs.len());
    let mut acc: Option<BigUint> = None;
    for x in xs {
        let next = match acc {
            None => x.clone(),
            Some(prev) => prev + x + 1u32,
        };
        set.push(next.clone());
        acc = Some(next);
    }
    set
}

/// Inverse prefix transform: strictly increasing sequence to tuple.
pub fn iset_to_ilist(set: &[BigUint]) -> Vec<BigUint> {
    let mut xs = Vec::with_capacity(set.len());
    let mut prev: Option<&BigUint> = None;
    for s in set {
        let x = match prev {
            None => s.clone(),
            Some(p) => s - p - 1u32,
        };
        xs.push(x);
        prev = Some(s);
    }
    xs
}

/// Ranks a tuple of naturals. The empty tuple ranks as 0.
pub fn ilist_to_i(xs: &[BigUint]) -> BigUint {
    ilist_to_iset(xs)
        .iter()
        .enumerate()
        .fold(BigUint::zero(), |rank, (i, s)| rank + binomial(s, i + 1))
}

/// Unranks `code` into a tuple of `length` naturals.
///
/// For `length = 0` only code 0 is valid.
pub fn i_to_ilist(code: &BigUint, length: usize) -> Vec<BigUint> {
    debug_assert!(length > 0 || code.is_zero(), "nonzero code for an empty tuple");
    let mut rest = code.clone();
    let mut set = Vec::with_capacity(length);
    for k in (1..=length).rev() {
        let d = largest_binomial_base(k, &rest);
        rest -= binomial(&d, k);
        set.push(d);
    }
    set.reverse();
    iset_to_ilist(&set)
}

/// Largest `d` with `C(d, k) ≤ n`, for `k ≥ 1`.
///
/// Gallops upward from `C(k-1, k) = 0`, then bisects the last step.
fn largest_binomial_base(k: usize, n: &BigUint) -> BigUint {
    let mut lo = BigUint::from(k - 1);
    let mut step = BigUint::one();
    let mut hi = &lo + &step;
    while binomial(&hi, k) <= *n {
        lo = hi;
        step <<= 1;
        hi = &lo + &step;
    }
    // C(lo, k) ≤ n < C(hi, k)
    while &hi - &lo > BigUint::one() {
        let mid = (&lo + &hi) >> 1;
        if binomial(&mid, k) <= *n {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}
