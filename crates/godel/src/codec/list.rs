//! Variable-length sequences.
//!
//! Lists over a finite element type of size `n` are numbered by length:
//! the block for length `L` holds the `n^L` lists of that length in mixed
//! radix, after all shorter blocks. Lists over an infinite element type
//! pair the length with the rank of the element tuple.

use std::sync::Arc;

use num_bigint::BigUint;
use num_traits::{pow, One, ToPrimitive, Zero};
use rustc_hash::FxHashMap;

use crate::codec::{check_code, check_type, Bijectable, Codec, CodecOptions, DEFAULT_MAX_LENGTH};
use crate::error::{DomainError, RangeError, SchemaError};
use crate::model::{List, Name, Size, Text, Value};
use crate::pairing::{f_to_flist, flist_to_f, i_to_ilist, ilist_to_i};

// =============================================================================
// SEQUENCE NUMBERING
// =============================================================================

/// Number of lists shorter than `length` over an alphabet of `base`
/// symbols: `Σ_{l<length} base^l`.
fn block_offset(base: &BigUint, length: usize) -> BigUint {
    if base.is_zero() {
        return BigUint::from(length.min(1));
    }
    if base.is_one() {
        return BigUint::from(length);
    }
    (pow(base.clone(), length) - 1u32) / (base - 1u32)
}

fn length_exceeds_limit(type_name: &str, len: impl ToString, max: usize) -> RangeError {
    RangeError::LengthExceedsLimit {
        type_name: type_name.to_string(),
        len: len.to_string(),
        max,
    }
}

/// Numbers a list of digits below `base`, shorter lists first.
fn encode_bounded(digits: &[BigUint], base: &BigUint) -> BigUint {
    block_offset(base, digits.len()) + flist_to_f(digits, std::iter::repeat(base))
}

/// Inverse of [`encode_bounded`]. Fails before allocating if the list
/// would be longer than `max`.
fn decode_bounded(
    code: &BigUint,
    base: &BigUint,
    max: usize,
    type_name: &str,
) -> Result<Vec<BigUint>, RangeError> {
    if base.is_one() {
        let length = code
            .to_usize()
            .filter(|&length| length <= max)
            .ok_or_else(|| length_exceeds_limit(type_name, code, max))?;
        return Ok(vec![BigUint::zero(); length]);
    }
    let mut rest = code.clone();
    let mut block = BigUint::one();
    let mut length = 0usize;
    while rest >= block {
        if length == max {
            return Err(length_exceeds_limit(type_name, format!("more than {}", max), max));
        }
        rest -= &block;
        block *= base;
        length += 1;
    }
    Ok(f_to_flist(&rest, std::iter::repeat(base), length))
}

/// Numbers a list of unbounded naturals: `[] ↦ 0`, otherwise
/// `1 + pair(len - 1, rank)`.
fn encode_unbounded(codes: &[BigUint], options: &CodecOptions) -> BigUint {
    match codes.len() {
        0 => BigUint::zero(),
        len => {
            let rank = ilist_to_i(codes);
            options.pairing.pair(&BigUint::from(len - 1), &rank) + 1u32
        }
    }
}

/// Inverse of [`encode_unbounded`]. Fails before allocating if the list
/// would be longer than `options.max_length`.
fn decode_unbounded(
    code: &BigUint,
    options: &CodecOptions,
    type_name: &str,
) -> Result<Vec<BigUint>, RangeError> {
    if code.is_zero() {
        return Ok(Vec::new());
    }
    let (last, rank) = options.pairing.unpair(&(code - 1u32));
    let length = last
        .to_usize()
        .and_then(|l| l.checked_add(1))
        .filter(|&length| length <= options.max_length)
        .ok_or_else(|| length_exceeds_limit(type_name, &last + 1u32, options.max_length))?;
    Ok(i_to_ilist(&rank, length))
}

// =============================================================================
// LISTS
// =============================================================================

/// Codec for lists of one element type; the type name is `List<elem>`.
#[derive(Debug, Clone)]
pub struct ListCodec {
    name: Name,
    element: Codec,
    options: CodecOptions,
    size: Size,
}

impl ListCodec {
    pub fn new(element: Codec) -> Self {
        Self::with_options(element, CodecOptions::default())
    }

    pub fn with_options(element: Codec, options: CodecOptions) -> Self {
        let name = Name::from(format!("List<{}>", element.type_name()));
        // only the empty list has elements from an empty domain
        let size = match element.size() {
            Size::Finite(n) if n.is_zero() => Size::one(),
            _ => Size::Infinite,
        };
        tracing::debug!(name = %name, pairing = ?options.pairing, size = %size, "list codec assembled");
        Self {
            name,
            element,
            options,
            size,
        }
    }

    pub fn element(&self) -> &Codec {
        &self.element
    }

    /// Wraps elements into a list value of this codec's type.
    pub fn list(&self, elements: Vec<Value>) -> Value {
        Value::List(List {
            ty: self.name.clone(),
            elements,
        })
    }

    pub fn into_codec(self) -> Codec {
        Arc::new(self)
    }
}

impl Bijectable for ListCodec {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> &Size {
        &self.size
    }

    fn encode(&self, value: &Value) -> Result<BigUint, DomainError> {
        check_type(self, value)?;
        let Value::List(list) = value else {
            return Err(DomainError::TypeMismatch {
                codec: self.name.to_string(),
                found: value.type_name().to_string(),
            });
        };
        let codes = list
            .elements
            .iter()
            .map(|element| self.element.encode(element))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(match self.element.size() {
            Size::Finite(base) => encode_bounded(&codes, base),
            Size::Infinite => encode_unbounded(&codes, &self.options),
        })
    }

    fn decode(&self, code: &BigUint) -> Result<Value, RangeError> {
        check_code(self, code)?;
        let codes = match self.element.size() {
            Size::Finite(base) => decode_bounded(code, base, self.options.max_length, &self.name)?,
            Size::Infinite => decode_unbounded(code, &self.options, &self.name)?,
        };
        let elements = codes
            .iter()
            .map(|c| self.element.decode(c))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.list(elements))
    }
}

// =============================================================================
// STRINGS
// =============================================================================

/// Strings over a fixed alphabet, numbered as lists of character indices.
///
/// The alphabet is part of the descriptor and never encoded; the type
/// name is `Text<alphabet>`.
#[derive(Debug, Clone)]
pub struct AlphabetString {
    name: Name,
    alphabet: Vec<char>,
    index: FxHashMap<char, usize>,
    base: BigUint,
    max_length: usize,
    size: Size,
}

impl AlphabetString {
    pub fn new(alphabet: &str) -> Result<Self, SchemaError> {
        let chars: Vec<char> = alphabet.chars().collect();
        let name = Name::from(format!("Text<{}>", alphabet));
        if chars.is_empty() {
            return Err(SchemaError::EmptyDomain {
                type_name: name.to_string(),
            });
        }
        let mut index = FxHashMap::default();
        for (i, &c) in chars.iter().enumerate() {
            if index.insert(c, i).is_some() {
                return Err(SchemaError::DuplicateCharacter { char: c });
            }
        }
        tracing::debug!(name = %name, symbols = chars.len(), "alphabet string codec assembled");
        Ok(Self {
            name,
            base: BigUint::from(chars.len()),
            alphabet: chars,
            index,
            max_length: DEFAULT_MAX_LENGTH,
            size: Size::Infinite,
        })
    }

    /// Sets the longest string a decode may produce.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Wraps a string into a value of this codec's type.
    pub fn text(&self, text: impl Into<String>) -> Value {
        Value::Text(Text {
            ty: self.name.clone(),
            text: text.into(),
        })
    }
}

impl Bijectable for AlphabetString {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> &Size {
        &self.size
    }

    fn encode(&self, value: &Value) -> Result<BigUint, DomainError> {
        check_type(self, value)?;
        let Value::Text(text) = value else {
            return Err(DomainError::TypeMismatch {
                codec: self.name.to_string(),
                found: value.type_name().to_string(),
            });
        };
        let digits = text
            .text
            .chars()
            .map(|c| {
                self.index
                    .get(&c)
                    .map(|&i| BigUint::from(i))
                    .ok_or(DomainError::CharNotInAlphabet { char: c })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(encode_bounded(&digits, &self.base))
    }

    fn decode(&self, code: &BigUint) -> Result<Value, RangeError> {
        let digits = decode_bounded(code, &self.base, self.max_length, &self.name)?;
        let text = digits
            .iter()
            .map(|d| {
                d.to_usize()
                    .and_then(|i| self.alphabet.get(i).copied())
                    .ok_or_else(|| RangeError::MalformedAux {
                        type_name: self.name.to_string(),
                        context: "character index outside the alphabet",
                    })
            })
            .collect::<Result<String, _>>()?;
        Ok(self.text(text))
    }
}
