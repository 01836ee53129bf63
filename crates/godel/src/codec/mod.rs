//! Codecs: bijections between typed values and natural numbers.
//!
//! Every codec implements [`Bijectable`]. Leaf codecs live in
//! [`primitives`], [`rational`] and [`list`]; composite codecs are
//! assembled once with [`Product`], [`Union`] and [`Derive`] and are
//! immutable afterwards, so a [`Codec`] can be shared freely across
//! threads.

pub mod derive;
pub mod list;
pub mod primitives;
pub mod product;
pub mod rational;
pub mod union;

use std::fmt;
use std::sync::Arc;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::{DomainError, RangeError, SchemaError};
use crate::model::{Size, Value};
use crate::pairing::PairingStrategy;

pub use derive::{Derive, FromAux, ToAux};
pub use list::{AlphabetString, ListCodec};
pub use primitives::{
    booleans, boolean_enumeration, integers, naturals, positive_naturals, signed, unsigned,
    zigzag_decode, zigzag_encode, Enumeration, Naturals, Unsigned, Width,
};
pub use product::{Product, ProductBuilder};
pub use rational::{decode_fraction, encode_fraction, Rational};
pub use union::{Union, UnionBuilder};

/// A type with a declared size and mutually inverse encode/decode.
///
/// Implementations must satisfy, for every value `v` in the domain and
/// every code `c` in the codomain:
/// - `decode(encode(v)) == v`
/// - `encode(decode(c)) == c`
pub trait Bijectable: fmt::Debug + Send + Sync {
    /// Identifier of the values this codec accepts and produces.
    fn type_name(&self) -> &str;

    fn size(&self) -> &Size;

    fn encode(&self, value: &Value) -> Result<BigUint, DomainError>;

    fn decode(&self, code: &BigUint) -> Result<Value, RangeError>;

    /// Type identifiers of the values `encode` accepts and `decode`
    /// produces.
    ///
    /// This is just the codec's own name, except for unions, whose values
    /// keep the type of the member they came from.
    fn value_types(&self) -> Vec<&str> {
        vec![self.type_name()]
    }
}

/// Shared handle to an assembled codec.
pub type Codec = Arc<dyn Bijectable>;

/// Longest list or string a code may decode to by default.
pub const DEFAULT_MAX_LENGTH: usize = 1 << 20;

/// Options for sequence codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// Strategy used to pair two unbounded naturals.
    pub pairing: PairingStrategy,
    /// Decoding fails for codes of longer sequences. Every code still has
    /// a value; this only bounds what a decode call will allocate.
    pub max_length: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            pairing: PairingStrategy::default(),
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

impl CodecOptions {
    /// Creates options with the block pairing strategy and the default
    /// length limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pairing strategy.
    pub fn with_pairing(mut self, pairing: PairingStrategy) -> Self {
        self.pairing = pairing;
        self
    }

    /// Sets the longest sequence a decode may produce.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }
}

// =============================================================================
// SHARED CHECKS
// =============================================================================

/// Rejects values whose type identifier is not the codec's own.
pub(crate) fn check_type(codec: &dyn Bijectable, value: &Value) -> Result<(), DomainError> {
    if value.type_name() == codec.type_name() {
        Ok(())
    } else {
        Err(DomainError::TypeMismatch {
            codec: codec.type_name().to_string(),
            found: value.type_name().to_string(),
        })
    }
}

/// Rejects codecs that declare a finite size of zero.
pub(crate) fn check_size(codec: &dyn Bijectable) -> Result<(), SchemaError> {
    match codec.size() {
        Size::Finite(n) if n.is_zero() => Err(SchemaError::EmptyDomain {
            type_name: codec.type_name().to_string(),
        }),
        _ => Ok(()),
    }
}

/// Rejects codes at or past a finite size.
pub(crate) fn check_code(codec: &dyn Bijectable, code: &BigUint) -> Result<(), RangeError> {
    if codec.size().contains(code) {
        Ok(())
    } else {
        Err(RangeError::CodeOutOfRange {
            type_name: codec.type_name().to_string(),
            code: code.to_string(),
            size: codec.size().to_string(),
        })
    }
}
