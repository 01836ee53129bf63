//! Exact rational numbers.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::error::DomainError;

/// An irreducible fraction `a/b`.
///
/// Invariants: `gcd(|a|, |b|) = 1`, `b > 0`, and `b = 1` when `a = 0`.
/// The sign always lives in the numerator, so every rational number has
/// exactly one representation and equality is plain pair equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fraction {
    numerator: BigInt,
    denominator: BigInt,
}

impl Fraction {
    /// Creates a fraction from an irreducible pair.
    ///
    /// Fails if `b = 0` or `gcd(|a|, |b|) ≠ 1`. A negative denominator is
    /// accepted and its sign moved to the numerator.
    pub fn new(a: impl Into<BigInt>, b: impl Into<BigInt>) -> Result<Self, DomainError> {
        let a = a.into();
        let b = b.into();
        if b.is_zero() {
            return Err(DomainError::ZeroDenominator {
                numerator: a.to_string(),
            });
        }
        if !a.gcd(&b).is_one() {
            return Err(DomainError::NotIrreducible {
                numerator: a.to_string(),
                denominator: b.to_string(),
            });
        }
        Ok(Self::normalized(a, b))
    }

    /// Creates a fraction from any pair, dividing out common factors.
    pub fn reduced(a: impl Into<BigInt>, b: impl Into<BigInt>) -> Result<Self, DomainError> {
        let a = a.into();
        let b = b.into();
        if b.is_zero() {
            return Err(DomainError::ZeroDenominator {
                numerator: a.to_string(),
            });
        }
        Ok(Self::reduce(a, b))
    }

    /// The fraction `n/1`.
    pub fn from_integer(n: impl Into<BigInt>) -> Self {
        Self {
            numerator: n.into(),
            denominator: BigInt::one(),
        }
    }

    pub fn zero() -> Self {
        Self::from_integer(0)
    }

    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    /// Always positive.
    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.numerator.is_negative()
    }

    /// Returns true if the denominator is 1.
    pub fn is_integer(&self) -> bool {
        self.denominator.is_one()
    }

    /// Nearest `f64`, possibly infinite for huge operands.
    pub fn to_f64(&self) -> f64 {
        let a = self.numerator.to_f64().unwrap_or(f64::NAN);
        let b = self.denominator.to_f64().unwrap_or(f64::NAN);
        a / b
    }

    /// Divides by `other`.
    pub fn checked_div(&self, other: &Fraction) -> Result<Fraction, DomainError> {
        if other.is_zero() {
            return Err(DomainError::DivisionByZero);
        }
        Ok(Self::reduce(
            &self.numerator * &other.denominator,
            &self.denominator * &other.numerator,
        ))
    }

    /// Floor division with remainder: `self = q·other + r` where `q` is
    /// `floor(self / other)` and `r` carries the sign of `other`.
    pub fn div_rem(&self, other: &Fraction) -> Result<(BigInt, Fraction), DomainError> {
        if other.is_zero() {
            return Err(DomainError::DivisionByZero);
        }
        let dividend = &self.numerator * &other.denominator;
        let divisor = &other.numerator * &self.denominator;
        let (quotient, rest) = dividend.div_mod_floor(&divisor);
        let rest = Self::reduce(rest, &self.denominator * &other.denominator);
        Ok((quotient, rest))
    }

    /// Builds a fraction from parts already known to be coprime with
    /// `b ≠ 0`.
    pub(crate) fn from_coprime(a: BigInt, b: BigInt) -> Self {
        Self::normalized(a, b)
    }

    /// Divides out the gcd. `b` must be non-zero.
    fn reduce(a: BigInt, b: BigInt) -> Self {
        let g = a.gcd(&b);
        Self::normalized(a / &g, b / g)
    }

    /// Moves the sign into the numerator and fixes `0/b` to `0/1`.
    /// `a/b` must already be irreducible with `b ≠ 0`.
    fn normalized(a: BigInt, b: BigInt) -> Self {
        if a.is_zero() {
            return Self::zero();
        }
        if b.sign() == Sign::Minus {
            Self {
                numerator: -a,
                denominator: -b,
            }
        } else {
            Self {
                numerator: a,
                denominator: b,
            }
        }
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl PartialEq<BigInt> for Fraction {
    fn eq(&self, other: &BigInt) -> bool {
        self.is_integer() && &self.numerator == other
    }
}

impl From<BigInt> for Fraction {
    fn from(n: BigInt) -> Self {
        Self::from_integer(n)
    }
}

impl Neg for Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        Fraction {
            numerator: -self.numerator,
            denominator: self.denominator,
        }
    }
}

impl Neg for &Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        -self.clone()
    }
}

impl Add for &Fraction {
    type Output = Fraction;

    fn add(self, other: &Fraction) -> Fraction {
        Fraction::reduce(
            &self.numerator * &other.denominator + &other.numerator * &self.denominator,
            &self.denominator * &other.denominator,
        )
    }
}

impl Add for Fraction {
    type Output = Fraction;

    fn add(self, other: Fraction) -> Fraction {
        &self + &other
    }
}

impl Sub for &Fraction {
    type Output = Fraction;

    fn sub(self, other: &Fraction) -> Fraction {
        self + &(-other)
    }
}

impl Sub for Fraction {
    type Output = Fraction;

    fn sub(self, other: Fraction) -> Fraction {
        &self - &other
    }
}

impl Mul for &Fraction {
    type Output = Fraction;

    fn mul(self, other: &Fraction) -> Fraction {
        Fraction::reduce(
            &self.numerator * &other.numerator,
            &self.denominator * &other.denominator,
        )
    }
}

impl Mul for Fraction {
    type Output = Fraction;

    fn mul(self, other: Fraction) -> Fraction {
        &self * &other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(a: i64, b: i64) -> Fraction {
        Fraction::new(a, b).unwrap()
    }

    #[test]
    fn test_construction_validation() {
        assert!(matches!(
            Fraction::new(1, 0),
            Err(DomainError::ZeroDenominator { .. })
        ));
        assert!(matches!(
            Fraction::new(2, 4),
            Err(DomainError::NotIrreducible { .. })
        ));
        assert!(matches!(
            Fraction::new(0, 2),
            Err(DomainError::NotIrreducible { .. })
        ));
    }

    #[test]
    fn test_canonical_form() {
        assert_eq!(q(0, -1), Fraction::zero());
        assert_eq!(q(0, -1).denominator(), &BigInt::one());
        assert_eq!(q(1, -2), q(-1, 2));
        assert_eq!(q(-3, -4), q(3, 4));
        assert!(q(1, -2).is_negative());
    }

    #[test]
    fn test_reduced() {
        assert_eq!(Fraction::reduced(6, -8).unwrap(), q(-3, 4));
        assert_eq!(Fraction::reduced(0, 5).unwrap(), Fraction::zero());
        assert!(Fraction::reduced(1, 0).is_err());
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(q(1, 2) + q(1, 3), q(5, 6));
        assert_eq!(q(1, 2) - q(1, 2), Fraction::zero());
        assert_eq!(q(2, 3) * q(3, 4), q(1, 2));
        assert_eq!(q(1, 2).checked_div(&q(1, 4)).unwrap(), q(2, 1));
        assert_eq!(-q(1, 2), q(-1, 2));
        assert!(matches!(
            q(1, 2).checked_div(&Fraction::zero()),
            Err(DomainError::DivisionByZero)
        ));
    }

    #[test]
    fn test_div_rem() {
        // 7/2 = 1·(3/1) + 1/2
        let (quotient, rest) = q(7, 2).div_rem(&q(3, 1)).unwrap();
        assert_eq!(quotient, BigInt::from(1));
        assert_eq!(rest, q(1, 2));

        // floor semantics: -7/2 = -2·(3/1) + 5/2
        let (quotient, rest) = q(-7, 2).div_rem(&q(3, 1)).unwrap();
        assert_eq!(quotient, BigInt::from(-2));
        assert_eq!(rest, q(5, 2));
    }

    #[test]
    fn test_integer_equality_and_display() {
        assert!(q(5, 1) == BigInt::from(5));
        assert!(q(5, 2) != BigInt::from(5));
        assert_eq!(q(-3, 7).to_string(), "-3/7");
        assert_eq!(q(1, 4).to_f64(), 0.25);
    }
}
