//! Self-describing values handled by codecs.
//!
//! Every value knows the identifier of the type it belongs to, which is
//! what unions dispatch on and what derived codecs check their auxiliary
//! values against.

use std::fmt;
use std::sync::Arc;

use num_bigint::{BigInt, BigUint};

use crate::model::Fraction;
use crate::registry::HostType;

/// Shared, immutable identifier for types and fields.
pub type Name = Arc<str>;

/// A value of some encodable type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Unbounded natural number (type `N0`).
    Nat(BigUint),
    /// Unbounded signed integer (type `Z`).
    Int(BigInt),
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    /// Rational number (type `Q`).
    Fraction(Fraction),
    /// Member of a finite enumeration.
    Symbol(Symbol),
    Record(Record),
    List(List),
    Text(Text),
    /// Value of a user-declared type transported over another codec.
    Newtype(Newtype),
}

impl Value {
    /// Identifier of the exact type of this value.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Nat(_) => "N0",
            Value::Int(_) => "Z",
            Value::Fraction(_) => "Q",
            Value::Symbol(s) => &*s.ty,
            Value::Record(r) => &*r.ty,
            Value::List(l) => &*l.ty,
            Value::Text(t) => &*t.ty,
            Value::Newtype(n) => &*n.ty,
            _ => match self.host_type() {
                Some(host) => host.name(),
                None => "?",
            },
        }
    }

    /// The host type this value is a native instance of, if any.
    pub fn host_type(&self) -> Option<HostType> {
        match self {
            Value::Nat(_) => Some(HostType::BigUint),
            Value::Int(_) => Some(HostType::BigInt),
            Value::Bool(_) => Some(HostType::Bool),
            Value::U8(_) => Some(HostType::U8),
            Value::U16(_) => Some(HostType::U16),
            Value::U32(_) => Some(HostType::U32),
            Value::U64(_) => Some(HostType::U64),
            Value::I8(_) => Some(HostType::I8),
            Value::I16(_) => Some(HostType::I16),
            Value::I32(_) => Some(HostType::I32),
            Value::I64(_) => Some(HostType::I64),
            Value::Fraction(_) => Some(HostType::Fraction),
            _ => None,
        }
    }

    pub fn as_nat(&self) -> Option<&BigUint> {
        match self {
            Value::Nat(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<&BigInt> {
        match self {
            Value::Int(z) => Some(z),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }
}

/// Variant `index` of the enumeration named `ty`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub ty: Name,
    pub index: usize,
}

/// A record with named fields.
///
/// Field order is irrelevant for encoding; decoding yields fields in
/// declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    pub ty: Name,
    pub fields: Vec<(Name, Value)>,
}

impl Record {
    /// Creates a record with no fields.
    pub fn new(ty: impl Into<Name>) -> Self {
        Self {
            ty: ty.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field.
    pub fn with(mut self, name: impl Into<Name>, value: impl Into<Value>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Looks up a field by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| &**field == name)
            .map(|(_, value)| value)
    }
}

/// A variable-length list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct List {
    pub ty: Name,
    pub elements: Vec<Value>,
}

/// A string over a fixed alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Text {
    pub ty: Name,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Newtype {
    pub ty: Name,
    pub inner: Box<Value>,
}

impl Newtype {
    pub fn new(ty: impl Into<Name>, inner: impl Into<Value>) -> Self {
        Self {
            ty: ty.into(),
            inner: Box::new(inner.into()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nat(n) => write!(f, "{}", n),
            Value::Int(z) => write!(f, "{}", z),
            Value::Bool(b) => write!(f, "{}", b),
            Value::U8(v) => write!(f, "{}", v),
            Value::U16(v) => write!(f, "{}", v),
            Value::U32(v) => write!(f, "{}", v),
            Value::U64(v) => write!(f, "{}", v),
            Value::I8(v) => write!(f, "{}", v),
            Value::I16(v) => write!(f, "{}", v),
            Value::I32(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::Fraction(q) => write!(f, "{}", q),
            Value::Symbol(s) => write!(f, "{}#{}", s.ty, s.index),
            Value::Record(r) => {
                write!(f, "{} {{", r.ty)?;
                for (i, (name, value)) in r.fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, " {}: {}", name, value)?;
                }
                f.write_str(" }")
            }
            Value::List(l) => {
                f.write_str("[")?;
                for (i, value) in l.elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                f.write_str("]")
            }
            Value::Text(t) => write!(f, "{:?}", t.text),
            Value::Newtype(n) => write!(f, "{}({})", n.ty, n.inner),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from! {
    BigUint => Nat,
    BigInt => Int,
    bool => Bool,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    Fraction => Fraction,
    Symbol => Symbol,
    Record => Record,
    List => List,
    Text => Text,
    Newtype => Newtype,
}
