//! Cardinality of a codec's domain.

use std::fmt;

use num_bigint::BigUint;
use num_traits::One;

/// Number of values a codec can represent.
///
/// A finite size `N` means codes range over `[0, N)`; an infinite size
/// means every non-negative integer is a valid code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Size {
    Finite(BigUint),
    Infinite,
}

impl Size {
    /// Creates a finite size. Codecs must not report a size of zero;
    /// assembly rejects members and adapters that do.
    pub fn finite(n: impl Into<BigUint>) -> Self {
        Size::Finite(n.into())
    }

    /// The size of a domain with exactly one value.
    pub fn one() -> Self {
        Size::Finite(BigUint::one())
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Size::Infinite)
    }

    pub fn is_finite(&self) -> bool {
        !self.is_infinite()
    }

    /// Returns the bound of a finite size.
    pub fn as_finite(&self) -> Option<&BigUint> {
        match self {
            Size::Finite(n) => Some(n),
            Size::Infinite => None,
        }
    }

    /// Returns true if `code` is a valid code for this size.
    pub fn contains(&self, code: &BigUint) -> bool {
        match self {
            Size::Finite(n) => code < n,
            Size::Infinite => true,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Size::Finite(n) => write!(f, "{}", n),
            Size::Infinite => f.write_str("infinite"),
        }
    }
}
