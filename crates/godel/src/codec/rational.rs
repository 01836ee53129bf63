//! Rational numbers via the Stern-Brocot tree.
//!
//! Codes 0, 1 and 2 are `0`, `1` and `-1`. Every other fraction is
//! oriented to `lo/hi` with `lo < hi`, located in the tree below `1/2`,
//! and stored as `3 + 4·path + mode` where `mode = 2·negative + (|a| > |b|)`.
//! Simpler fractions get smaller codes.

use std::sync::Arc;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

use crate::codec::{Bijectable, Codec};
use crate::error::{DomainError, RangeError};
use crate::model::{Fraction, Size, Value};
use crate::pairing::{merge, unmerge};

/// Codes below this are the special cases `0`, `1`, `-1`.
const FIRST_GENERAL_CODE: u32 = 3;

/// Codec for exact rationals (type `Q`).
#[derive(Debug, Clone)]
pub struct Rational {
    size: Size,
}

impl Rational {
    pub const NAME: &'static str = "Q";

    pub fn new() -> Self {
        Self {
            size: Size::Infinite,
        }
    }

    pub fn codec() -> Codec {
        Arc::new(Self::new())
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::new()
    }
}

impl Bijectable for Rational {
    fn type_name(&self) -> &str {
        Self::NAME
    }

    fn size(&self) -> &Size {
        &self.size
    }

    fn encode(&self, value: &Value) -> Result<BigUint, DomainError> {
        match value {
            Value::Fraction(q) => Ok(encode_fraction(q)),
            other => Err(DomainError::TypeMismatch {
                codec: Self::NAME.to_string(),
                found: other.type_name().to_string(),
            }),
        }
    }

    fn decode(&self, code: &BigUint) -> Result<Value, RangeError> {
        Ok(Value::Fraction(decode_fraction(code)))
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a fraction.
pub fn encode_fraction(q: &Fraction) -> BigUint {
    let negative = q.is_negative();
    let a = q.numerator().magnitude();
    let b = q.denominator().magnitude();

    if a.is_zero() {
        return BigUint::zero();
    }
    if a.is_one() && b.is_one() {
        return BigUint::from(1u32 + u32::from(negative));
    }

    let hi_div_lo = a > b;
    let (lo, hi) = if hi_div_lo { (b, a) } else { (a, b) };
    let mode = BigUint::from(2 * u32::from(negative) + u32::from(hi_div_lo));
    let path = tree_path(lo, hi);
    merge(&mode, &path, &BigUint::from(4u32)) + FIRST_GENERAL_CODE
}

/// Index of `lo/hi` (coprime, `0 < lo < hi`) among the tree nodes below
/// `1/2`; shallower nodes get smaller indices.
///
/// Walks from the node up to the root, recording whether each step leaves
/// a right child. The last step always comes from `1/2`, a left child, and
/// is dropped.
fn tree_path(lo: &BigUint, hi: &BigUint) -> BigUint {
    let mut bits = Vec::new();
    let mut a = lo.clone();
    let mut b = hi.clone();
    while !(a.is_one() && b.is_one()) && !a.is_zero() {
        let x2 = &b - &a;
        if x2 < a {
            bits.push(true);
            b = a;
            a = x2;
        } else {
            bits.push(false);
            b = x2;
        }
    }
    bits.pop();

    // "1" followed by the recorded bits in walk order, minus one
    let mut path = BigUint::one();
    for bit in bits {
        path <<= 1;
        if bit {
            path += 1u32;
        }
    }
    path - 1u32
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a fraction. Every code is valid.
pub fn decode_fraction(code: &BigUint) -> Fraction {
    if code < &BigUint::from(FIRST_GENERAL_CODE) {
        return match code.iter_u32_digits().next().unwrap_or(0) {
            0 => Fraction::zero(),
            1 => Fraction::from_integer(1),
            _ => Fraction::from_integer(-1),
        };
    }

    let (mode, path) = unmerge(&(code - FIRST_GENERAL_CODE), &BigUint::from(4u32));
    let negative = mode.bit(1);
    let hi_div_lo = mode.bit(0);

    let (lo, hi) = tree_node(&path);
    let (a, b) = if hi_div_lo { (hi, lo) } else { (lo, hi) };
    let sign = if negative { Sign::Minus } else { Sign::Plus };
    Fraction::from_coprime(BigInt::from_biguint(sign, a), BigInt::from(b))
}

/// Inverse of [`tree_path`].
///
/// The bits of `path + 1` below its leading one, least significant first,
/// are the moves down from `1/2`.
fn tree_node(path: &BigUint) -> (BigUint, BigUint) {
    let marked = path + 1u32;
    let mut a = BigUint::one();
    let mut b = BigUint::from(2u32);
    for i in 0..marked.bits().saturating_sub(1) {
        let sum = &a + &b;
        if marked.bit(i) {
            a = b;
        }
        b = sum;
    }
    (a, b)
}
