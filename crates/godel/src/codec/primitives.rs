//! Leaf codecs and the standard derived primitives.
//!
//! Two codecs are built directly on codes: the unbounded naturals
//! ([`Naturals`], `N0`) and finite enumerations ([`Enumeration`]).
//! Machine unsigned integers ([`Unsigned`]) are naturals below `2^bits`.
//! Everything else here is derived from those through [`Derive`].

use std::sync::Arc;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, ToPrimitive, Zero};
use rustc_hash::FxHashSet;

use crate::codec::derive::{malformed, Derive};
use crate::codec::{check_code, check_type, Bijectable, Codec};
use crate::error::{DomainError, RangeError, SchemaError};
use crate::model::{Name, Newtype, Size, Symbol, Value};

// =============================================================================
// ZIGZAG
// =============================================================================

/// Zigzag encodes a signed integer: 0, -1, 1, -2, … ↦ 0, 1, 2, 3, …
#[inline]
pub fn zigzag_encode(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

/// Zigzag decodes an unsigned integer to signed.
#[inline]
pub fn zigzag_decode(n: u64) -> i64 {
    ((n >> 1) as i64) ^ (-((n & 1) as i64))
}

/// Zigzag folding of an unbounded integer onto the naturals.
pub fn fold_integer(z: &BigInt) -> BigUint {
    let magnitude = z.magnitude();
    match z.sign() {
        Sign::Minus => (magnitude << 1) - 1u32,
        _ => magnitude << 1,
    }
}

/// Inverse of [`fold_integer`].
pub fn unfold_integer(n: &BigUint) -> BigInt {
    let half = BigInt::from(n >> 1);
    if n.bit(0) { -half - 1 } else { half }
}

// =============================================================================
// NATURALS
// =============================================================================

/// The unbounded naturals `N0`; the identity bijection.
#[derive(Debug, Clone)]
pub struct Naturals {
    size: Size,
}

impl Naturals {
    pub const NAME: &'static str = "N0";

    pub fn new() -> Self {
        Self {
            size: Size::Infinite,
        }
    }
}

impl Default for Naturals {
    fn default() -> Self {
        Self::new()
    }
}

impl Bijectable for Naturals {
    fn type_name(&self) -> &str {
        Self::NAME
    }

    fn size(&self) -> &Size {
        &self.size
    }

    fn encode(&self, value: &Value) -> Result<BigUint, DomainError> {
        match value {
            Value::Nat(n) => Ok(n.clone()),
            other => Err(DomainError::TypeMismatch {
                codec: Self::NAME.to_string(),
                found: other.type_name().to_string(),
            }),
        }
    }

    fn decode(&self, code: &BigUint) -> Result<Value, RangeError> {
        Ok(Value::Nat(code.clone()))
    }
}

// =============================================================================
// ENUMERATIONS
// =============================================================================

/// A named finite set of variants, numbered in declaration order.
#[derive(Debug, Clone)]
pub struct Enumeration {
    name: Name,
    variants: Vec<Name>,
    size: Size,
}

impl Enumeration {
    /// Declares an enumeration. Fails on an empty or repeated variant list.
    pub fn new<I, S>(name: impl Into<Name>, variants: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Name>,
    {
        let name = name.into();
        let variants: Vec<Name> = variants.into_iter().map(Into::into).collect();
        if variants.is_empty() {
            return Err(SchemaError::EmptyDomain {
                type_name: name.to_string(),
            });
        }
        let mut seen = FxHashSet::default();
        for variant in &variants {
            if !seen.insert(variant.clone()) {
                return Err(SchemaError::DuplicateVariant {
                    type_name: name.to_string(),
                    variant: variant.to_string(),
                });
            }
        }
        let size = Size::finite(variants.len());
        tracing::debug!(name = %name, variants = variants.len(), "enumeration assembled");
        Ok(Self {
            name,
            variants,
            size,
        })
    }

    pub fn variants(&self) -> &[Name] {
        &self.variants
    }

    /// The symbol for a variant, if it is declared.
    pub fn symbol(&self, variant: &str) -> Option<Value> {
        self.variants
            .iter()
            .position(|v| &**v == variant)
            .map(|index| self.symbol_at(index))
    }

    /// Name of the variant a symbol stands for.
    pub fn variant_name(&self, symbol: &Symbol) -> Option<&str> {
        if symbol.ty != self.name {
            return None;
        }
        self.variants.get(symbol.index).map(|v| &**v)
    }

    fn symbol_at(&self, index: usize) -> Value {
        Value::Symbol(Symbol {
            ty: self.name.clone(),
            index,
        })
    }
}

impl Bijectable for Enumeration {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> &Size {
        &self.size
    }

    fn encode(&self, value: &Value) -> Result<BigUint, DomainError> {
        check_type(self, value)?;
        match value {
            Value::Symbol(symbol) if symbol.index < self.variants.len() => {
                Ok(BigUint::from(symbol.index))
            }
            other => Err(DomainError::OutOfDomain {
                type_name: self.name.to_string(),
                value: other.to_string(),
            }),
        }
    }

    fn decode(&self, code: &BigUint) -> Result<Value, RangeError> {
        check_code(self, code)?;
        let index = code.to_usize().ok_or_else(|| RangeError::CodeOutOfRange {
            type_name: self.name.to_string(),
            code: code.to_string(),
            size: self.size.to_string(),
        })?;
        Ok(self.symbol_at(index))
    }
}

// =============================================================================
// MACHINE INTEGERS
// =============================================================================

/// Bit width of a machine integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Width {
    W8,
    W16,
    W32,
    W64,
}

impl Width {
    pub fn bits(self) -> u32 {
        match self {
            Width::W8 => 8,
            Width::W16 => 16,
            Width::W32 => 32,
            Width::W64 => 64,
        }
    }

    pub fn unsigned_name(self) -> &'static str {
        match self {
            Width::W8 => "u8",
            Width::W16 => "u16",
            Width::W32 => "u32",
            Width::W64 => "u64",
        }
    }

    pub fn signed_name(self) -> &'static str {
        match self {
            Width::W8 => "i8",
            Width::W16 => "i16",
            Width::W32 => "i32",
            Width::W64 => "i64",
        }
    }
}

/// Machine unsigned integers of one width; codes are the values.
#[derive(Debug, Clone)]
pub struct Unsigned {
    width: Width,
    size: Size,
}

impl Unsigned {
    pub fn new(width: Width) -> Self {
        Self {
            width,
            size: Size::Finite(BigUint::one() << width.bits()),
        }
    }

    pub fn width(&self) -> Width {
        self.width
    }
}

impl Bijectable for Unsigned {
    fn type_name(&self) -> &str {
        self.width.unsigned_name()
    }

    fn size(&self) -> &Size {
        &self.size
    }

    fn encode(&self, value: &Value) -> Result<BigUint, DomainError> {
        match (self.width, value) {
            (Width::W8, Value::U8(v)) => Ok(BigUint::from(*v)),
            (Width::W16, Value::U16(v)) => Ok(BigUint::from(*v)),
            (Width::W32, Value::U32(v)) => Ok(BigUint::from(*v)),
            (Width::W64, Value::U64(v)) => Ok(BigUint::from(*v)),
            (_, other) => Err(DomainError::TypeMismatch {
                codec: self.type_name().to_string(),
                found: other.type_name().to_string(),
            }),
        }
    }

    fn decode(&self, code: &BigUint) -> Result<Value, RangeError> {
        check_code(self, code)?;
        let out_of_range = || RangeError::CodeOutOfRange {
            type_name: self.type_name().to_string(),
            code: code.to_string(),
            size: self.size.to_string(),
        };
        let value = match self.width {
            Width::W8 => Value::U8(code.to_u8().ok_or_else(out_of_range)?),
            Width::W16 => Value::U16(code.to_u16().ok_or_else(out_of_range)?),
            Width::W32 => Value::U32(code.to_u32().ok_or_else(out_of_range)?),
            Width::W64 => Value::U64(code.to_u64().ok_or_else(out_of_range)?),
        };
        Ok(value)
    }
}

/// Codec for the unsigned machine integers of `width`.
pub fn unsigned(width: Width) -> Codec {
    Arc::new(Unsigned::new(width))
}

/// Codec for the signed machine integers of `width`, zigzag-derived from
/// the unsigned codec of the same width.
pub fn signed(width: Width) -> Codec {
    let name = width.signed_name();
    Arc::new(Derive::new(
        name,
        unsigned(width),
        move |value| match *value {
            Value::I8(v) => Ok(Value::U8(zigzag_encode(i64::from(v)) as u8)),
            Value::I16(v) => Ok(Value::U16(zigzag_encode(i64::from(v)) as u16)),
            Value::I32(v) => Ok(Value::U32(zigzag_encode(i64::from(v)) as u32)),
            Value::I64(v) => Ok(Value::U64(zigzag_encode(v))),
            ref other => Err(DomainError::TypeMismatch {
                codec: name.to_string(),
                found: other.type_name().to_string(),
            }),
        },
        move |aux| match aux {
            Value::U8(v) => Ok(Value::I8(zigzag_decode(u64::from(v)) as i8)),
            Value::U16(v) => Ok(Value::I16(zigzag_decode(u64::from(v)) as i16)),
            Value::U32(v) => Ok(Value::I32(zigzag_decode(u64::from(v)) as i32)),
            Value::U64(v) => Ok(Value::I64(zigzag_decode(v))),
            _ => Err(malformed(name, "expected an unsigned machine integer")),
        },
    ))
}

// =============================================================================
// STANDARD DERIVED PRIMITIVES
// =============================================================================

/// The unbounded naturals `N0`.
pub fn naturals() -> Codec {
    Arc::new(Naturals::new())
}

/// The unbounded integers `Z`, zigzag-folded onto `N0`.
pub fn integers() -> Codec {
    Arc::new(Derive::new(
        "Z",
        naturals(),
        |value| match value {
            Value::Int(z) => Ok(Value::Nat(fold_integer(z))),
            other => Err(DomainError::TypeMismatch {
                codec: "Z".to_string(),
                found: other.type_name().to_string(),
            }),
        },
        |aux| match aux {
            Value::Nat(n) => Ok(Value::Int(unfold_integer(&n))),
            _ => Err(malformed("Z", "expected N0")),
        },
    ))
}

/// The positive naturals `N1`, shifted down onto `N0`.
///
/// Values are `Newtype`s named `N1` wrapping a natural.
pub fn positive_naturals() -> Codec {
    Arc::new(Derive::new(
        "N1",
        naturals(),
        |value| match value {
            Value::Newtype(n) => match &*n.inner {
                Value::Nat(x) if !x.is_zero() => Ok(Value::Nat(x - 1u32)),
                other => Err(DomainError::OutOfDomain {
                    type_name: "N1".to_string(),
                    value: other.to_string(),
                }),
            },
            other => Err(DomainError::TypeMismatch {
                codec: "N1".to_string(),
                found: other.type_name().to_string(),
            }),
        },
        |aux| match aux {
            Value::Nat(n) => Ok(Newtype::new("N1", Value::Nat(n + 1u32)).into()),
            _ => Err(malformed("N1", "expected N0")),
        },
    ))
}

/// The two-element enumeration `Boolean { false, true }`.
pub fn boolean_enumeration() -> Enumeration {
    Enumeration {
        name: Name::from("Boolean"),
        variants: vec![Name::from("false"), Name::from("true")],
        size: Size::finite(2u32),
    }
}

/// Host booleans, derived from [`boolean_enumeration`].
pub fn booleans() -> Codec {
    Arc::new(Derive::new(
        "bool",
        Arc::new(boolean_enumeration()),
        |value| match value {
            Value::Bool(b) => Ok(Value::Symbol(Symbol {
                ty: Name::from("Boolean"),
                index: usize::from(*b),
            })),
            other => Err(DomainError::TypeMismatch {
                codec: "bool".to_string(),
                found: other.type_name().to_string(),
            }),
        },
        |aux| match aux {
            Value::Symbol(Symbol { index: 0, .. }) => Ok(Value::Bool(false)),
            Value::Symbol(Symbol { index: 1, .. }) => Ok(Value::Bool(true)),
            _ => Err(malformed("bool", "expected a Boolean symbol")),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: u64) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn test_zigzag() {
        assert_eq!(zigzag_encode(0), 0);
        assert_eq!(zigzag_encode(-1), 1);
        assert_eq!(zigzag_encode(1), 2);
        assert_eq!(zigzag_encode(-2), 3);
        assert_eq!(zigzag_encode(i64::MAX), u64::MAX - 1);
        assert_eq!(zigzag_encode(i64::MIN), u64::MAX);

        for v in [0i64, 1, -1, 100, -100, i64::MAX, i64::MIN] {
            assert_eq!(zigzag_decode(zigzag_encode(v)), v);
        }
    }

    #[test]
    fn test_fold_integer_matches_zigzag() {
        for v in -500i64..500 {
            let folded = fold_integer(&BigInt::from(v));
            assert_eq!(folded, n(zigzag_encode(v)));
            assert_eq!(unfold_integer(&folded), BigInt::from(v));
        }
    }

    #[test]
    fn test_naturals_identity() {
        let codec = naturals();
        assert_eq!(codec.encode(&Value::Nat(n(5))).unwrap(), n(5));
        assert_eq!(codec.decode(&n(5)).unwrap(), Value::Nat(n(5)));
        assert!(codec.encode(&Value::U8(5)).is_err());
    }

    #[test]
    fn test_integers() {
        let codec = integers();
        assert_eq!(codec.type_name(), "Z");
        assert_eq!(codec.encode(&Value::Int(BigInt::from(0))).unwrap(), n(0));
        assert_eq!(codec.encode(&Value::Int(BigInt::from(-1))).unwrap(), n(1));
        assert_eq!(codec.encode(&Value::Int(BigInt::from(1))).unwrap(), n(2));
        for code in 0u64..1000 {
            let value = codec.decode(&n(code)).unwrap();
            assert_eq!(codec.encode(&value).unwrap(), n(code));
        }
    }

    #[test]
    fn test_positive_naturals() {
        let codec = positive_naturals();
        let one: Value = Newtype::new("N1", Value::Nat(n(1))).into();
        assert_eq!(codec.encode(&one).unwrap(), n(0));
        assert_eq!(codec.decode(&n(0)).unwrap(), one);

        let zero: Value = Newtype::new("N1", Value::Nat(n(0))).into();
        assert!(matches!(
            codec.encode(&zero),
            Err(DomainError::OutOfDomain { .. })
        ));
    }

    #[test]
    fn test_enumeration() {
        let colors = Enumeration::new("Color", ["red", "green", "blue"]).unwrap();
        assert_eq!(colors.size(), &Size::finite(3u32));
        let green = colors.symbol("green").unwrap();
        assert_eq!(colors.encode(&green).unwrap(), n(1));
        assert_eq!(colors.decode(&n(1)).unwrap(), green);
        assert!(matches!(
            colors.decode(&n(3)),
            Err(RangeError::CodeOutOfRange { .. })
        ));
        assert!(colors.symbol("purple").is_none());

        let Value::Symbol(symbol) = green else {
            panic!("expected a symbol");
        };
        assert_eq!(colors.variant_name(&symbol), Some("green"));
    }

    #[test]
    fn test_enumeration_schema_errors() {
        assert!(matches!(
            Enumeration::new("Empty", Vec::<&str>::new()),
            Err(SchemaError::EmptyDomain { .. })
        ));
        assert!(matches!(
            Enumeration::new("Twice", ["a", "a"]),
            Err(SchemaError::DuplicateVariant { .. })
        ));
    }

    #[test]
    fn test_booleans() {
        let codec = booleans();
        assert_eq!(codec.size(), &Size::finite(2u32));
        assert_eq!(codec.encode(&Value::Bool(false)).unwrap(), n(0));
        assert_eq!(codec.encode(&Value::Bool(true)).unwrap(), n(1));
        assert_eq!(codec.decode(&n(1)).unwrap(), Value::Bool(true));
        assert!(codec.decode(&n(2)).is_err());
    }

    #[test]
    fn test_unsigned_bounds() {
        let codec = unsigned(Width::W8);
        assert_eq!(codec.size(), &Size::finite(256u32));
        assert_eq!(codec.encode(&Value::U8(255)).unwrap(), n(255));
        assert_eq!(codec.decode(&n(255)).unwrap(), Value::U8(255));
        assert!(matches!(
            codec.decode(&n(256)),
            Err(RangeError::CodeOutOfRange { .. })
        ));
        assert!(codec.encode(&Value::U16(1)).is_err());

        let wide = unsigned(Width::W64);
        assert_eq!(wide.decode(&n(u64::MAX)).unwrap(), Value::U64(u64::MAX));
    }

    #[test]
    fn test_signed() {
        let codec = signed(Width::W8);
        assert_eq!(codec.type_name(), "i8");
        assert_eq!(codec.size(), &Size::finite(256u32));
        assert_eq!(codec.encode(&Value::I8(-1)).unwrap(), n(1));
        assert_eq!(codec.encode(&Value::I8(i8::MIN)).unwrap(), n(255));
        for code in 0u64..256 {
            let value = codec.decode(&n(code)).unwrap();
            assert_eq!(codec.encode(&value).unwrap(), n(code));
        }

        let wide = signed(Width::W64);
        assert_eq!(wide.decode(&n(u64::MAX)).unwrap(), Value::I64(i64::MIN));
    }
}
