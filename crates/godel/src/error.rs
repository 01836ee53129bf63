//! Error types for descriptor assembly, encoding and decoding.

use thiserror::Error;

use crate::registry::HostType;

/// Broad failure classes.
///
/// Schema errors happen while a descriptor is assembled (or when a
/// descriptor proves to be internally inconsistent at call time), domain
/// errors when a value is constructed or encoded, range errors when a code
/// is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Composition or registration is broken.
    Schema,
    /// A value lies outside the domain of its codec.
    Domain,
    /// A code lies outside the codomain of its codec.
    Range,
}

impl ErrorKind {
    /// Returns the code prefix for this kind (e.g., "S").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Schema => "S",
            ErrorKind::Domain => "D",
            ErrorKind::Range => "R",
        }
    }
}

/// Error while assembling a descriptor or populating a registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("[S001] {type_name} has an empty domain")]
    EmptyDomain { type_name: String },

    #[error("[S002] field {field:?} declared twice in {type_name}")]
    DuplicateField { type_name: String, field: String },

    #[error("[S003] variant {variant:?} declared twice in {type_name}")]
    DuplicateVariant { type_name: String, variant: String },

    #[error("[S004] character {char:?} appears twice in the alphabet")]
    DuplicateCharacter { char: char },

    #[error("[S005] no adapter registered for host type {host} (field {field:?})")]
    MissingAdapter { host: HostType, field: String },

    #[error("[S006] an adapter for host type {host} is already registered")]
    AdapterAlreadyRegistered { host: HostType },

    #[error("[S007] a union needs at least one member")]
    EmptyUnion,

    #[error("[S009] adapter {adapter} cannot stand in for host type {host}")]
    AdapterTypeMismatch { host: HostType, adapter: String },

    #[error("[S010] two different members of a union are both named {type_name}")]
    ConflictingMember { type_name: String },

    #[error("[S011] values of type {type_name} would belong to more than one union member")]
    AmbiguousMember { type_name: String },
}

impl SchemaError {
    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Schema
    }
}

/// Error while constructing or encoding a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("[D001] {codec} cannot encode a value of type {found}")]
    TypeMismatch { codec: String, found: String },

    #[error("[D002] record {type_name} is missing field {field:?}")]
    MissingField { type_name: String, field: String },

    #[error("[D003] record {type_name} has no field {field:?}")]
    UnexpectedField { type_name: String, field: String },

    #[error("[D004] {type_name} value {value} is outside its domain")]
    OutOfDomain { type_name: String, value: String },

    #[error("[D005] fraction can't have a zero denominator (got {numerator}/0)")]
    ZeroDenominator { numerator: String },

    #[error("[D006] fraction {numerator}/{denominator} is not irreducible")]
    NotIrreducible {
        numerator: String,
        denominator: String,
    },

    #[error("[D007] character {char:?} is not part of the alphabet")]
    CharNotInAlphabet { char: char },

    #[error("[D008] {union} has no member of type {found}")]
    NotAMember { union: String, found: String },

    #[error("[D009] division by the zero fraction")]
    DivisionByZero,

    #[error("[D010] record {type_name} sets field {field:?} twice")]
    DuplicateField { type_name: String, field: String },

    #[error("[S008] to_aux of {derived} returned a {found}, expected exactly {expected}")]
    AuxTypeMismatch {
        derived: String,
        expected: String,
        found: String,
    },
}

impl DomainError {
    /// Returns the error kind.
    ///
    /// A `to_aux` that produces the wrong auxiliary type is a broken
    /// declaration, so it is reported as a schema failure even though it
    /// surfaces during encoding.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::AuxTypeMismatch { .. } => ErrorKind::Schema,
            _ => ErrorKind::Domain,
        }
    }
}

/// Error while decoding a code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("[R001] code {code} out of range for {type_name} (size: {size})")]
    CodeOutOfRange {
        type_name: String,
        code: String,
        size: String,
    },

    #[error("[R002] malformed auxiliary value in {type_name}: {context}")]
    MalformedAux {
        type_name: String,
        context: &'static str,
    },

    #[error("[R003] {type_name} code decodes to length {len}, exceeding maximum {max}")]
    LengthExceedsLimit {
        type_name: String,
        len: String,
        max: usize,
    },
}

impl RangeError {
    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Range
    }
}

/// Error reported by the round-trip self-checks in [`crate::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("decoding failed during self-check: {0}")]
    Decode(#[from] RangeError),

    #[error("encoding failed during self-check: {0}")]
    Encode(#[from] DomainError),

    #[error("{type_name} does not agree with its inverse at code {code}: re-encoded as {reencoded}")]
    CodeMismatch {
        type_name: String,
        code: String,
        reencoded: String,
    },

    #[error("{type_name} does not agree with its inverse for {value}: decoded as {decoded}")]
    ValueMismatch {
        type_name: String,
        value: String,
        decoded: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(SchemaError::EmptyUnion.kind(), ErrorKind::Schema);
        assert_eq!(DomainError::DivisionByZero.kind(), ErrorKind::Domain);
        let aux = DomainError::AuxTypeMismatch {
            derived: "Z".into(),
            expected: "N0".into(),
            found: "bool".into(),
        };
        assert_eq!(aux.kind(), ErrorKind::Schema);
        assert_eq!(aux.kind().code(), "S");
    }

    #[test]
    fn test_messages_carry_codes() {
        let err = RangeError::CodeOutOfRange {
            type_name: "Boolean".into(),
            code: "2".into(),
            size: "2".into(),
        };
        assert!(err.to_string().starts_with("[R001]"));

        let err = RangeError::LengthExceedsLimit {
            type_name: "List<N0>".into(),
            len: "5".into(),
            max: 4,
        };
        assert_eq!(err.to_string(), "[R003] List<N0> code decodes to length 5, exceeding maximum 4");

        let err = SchemaError::AdapterAlreadyRegistered { host: HostType::U8 };
        assert_eq!(
            err.to_string(),
            "[S006] an adapter for host type u8 is already registered"
        );
    }
}
