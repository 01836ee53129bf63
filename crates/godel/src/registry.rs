//! Host-type adapter registry.
//!
//! Field and member declarations may name a bare host type such as `u8`
//! or `bool`; the registry supplies the codec that stands in for it.
//! Registries are populated through [`RegistryBuilder`] and immutable once
//! built, so every host type is bound at most once and never rebound.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::codec::primitives::{booleans, integers, naturals, signed, unsigned, Width};
use crate::codec::rational::Rational;
use crate::codec::{check_size, Bijectable, Codec};
use crate::error::SchemaError;

/// Host-native types that can appear directly in a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HostType {
    Bool,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    /// Arbitrary-precision natural.
    BigUint,
    /// Arbitrary-precision integer.
    BigInt,
    Fraction,
}

impl HostType {
    pub const ALL: [HostType; 12] = [
        HostType::Bool,
        HostType::U8,
        HostType::U16,
        HostType::U32,
        HostType::U64,
        HostType::I8,
        HostType::I16,
        HostType::I32,
        HostType::I64,
        HostType::BigUint,
        HostType::BigInt,
        HostType::Fraction,
    ];

    /// Returns the name of values of this host type (e.g., "u8").
    pub fn name(&self) -> &'static str {
        match self {
            HostType::Bool => "bool",
            HostType::U8 => "u8",
            HostType::U16 => "u16",
            HostType::U32 => "u32",
            HostType::U64 => "u64",
            HostType::I8 => "i8",
            HostType::I16 => "i16",
            HostType::I32 => "i32",
            HostType::I64 => "i64",
            HostType::BigUint => "N0",
            HostType::BigInt => "Z",
            HostType::Fraction => "Q",
        }
    }

    /// The codec the standard registry binds to this host type.
    pub fn standard_adapter(&self) -> Codec {
        match self {
            HostType::Bool => booleans(),
            HostType::U8 => unsigned(Width::W8),
            HostType::U16 => unsigned(Width::W16),
            HostType::U32 => unsigned(Width::W32),
            HostType::U64 => unsigned(Width::W64),
            HostType::I8 => signed(Width::W8),
            HostType::I16 => signed(Width::W16),
            HostType::I32 => signed(Width::W32),
            HostType::I64 => signed(Width::W64),
            HostType::BigUint => naturals(),
            HostType::BigInt => integers(),
            HostType::Fraction => Rational::codec(),
        }
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The type of a declared field or union member.
#[derive(Debug, Clone)]
pub enum FieldType {
    /// A bare host type, resolved through the registry.
    Host(HostType),
    /// An assembled codec, used as is.
    Codec(Codec),
}

impl From<HostType> for FieldType {
    fn from(host: HostType) -> Self {
        FieldType::Host(host)
    }
}

impl From<Codec> for FieldType {
    fn from(codec: Codec) -> Self {
        FieldType::Codec(codec)
    }
}

impl From<&Codec> for FieldType {
    fn from(codec: &Codec) -> Self {
        FieldType::Codec(codec.clone())
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Immutable table of host-type adapters.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    adapters: FxHashMap<HostType, Codec>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// A registry with no adapters.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Looks up the adapter bound to `host`.
    pub fn lookup(&self, host: HostType) -> Option<&Codec> {
        self.adapters.get(&host)
    }

    /// Resolves a declared field type to a codec.
    ///
    /// `field` only names the declaration site in the error. Codecs with an
    /// empty domain are rejected.
    pub fn resolve(&self, ty: &FieldType, field: &str) -> Result<Codec, SchemaError> {
        let codec = match ty {
            FieldType::Codec(codec) => codec.clone(),
            FieldType::Host(host) => {
                self.lookup(*host)
                    .cloned()
                    .ok_or_else(|| SchemaError::MissingAdapter {
                        host: *host,
                        field: field.to_string(),
                    })?
            }
        };
        check_size(&*codec)?;
        Ok(codec)
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

/// Builder for [`Registry`].
///
/// # Example
///
/// ```
/// use godel::{Bijectable, HostType, RegistryBuilder};
/// use godel::codec::naturals;
///
/// let registry = RegistryBuilder::new()
///     .register(HostType::BigUint, naturals())
///     .unwrap()
///     .build();
/// assert_eq!(registry.lookup(HostType::BigUint).unwrap().type_name(), "N0");
/// assert!(registry.lookup(HostType::U8).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    adapters: FxHashMap<HostType, Codec>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the standard adapter of every host type.
    ///
    /// Fails if any host type is already bound.
    pub fn with_standard_adapters(self) -> Result<Self, SchemaError> {
        HostType::ALL
            .iter()
            .try_fold(self, |builder, host| builder.register(*host, host.standard_adapter()))
    }

    /// Binds `adapter` to `host`. A host type can be bound only once, and
    /// only to a codec for values of that host type.
    pub fn register(mut self, host: HostType, adapter: Codec) -> Result<Self, SchemaError> {
        if self.adapters.contains_key(&host) {
            return Err(SchemaError::AdapterAlreadyRegistered { host });
        }
        if adapter.type_name() != host.name() {
            return Err(SchemaError::AdapterTypeMismatch {
                host,
                adapter: adapter.type_name().to_string(),
            });
        }
        check_size(&*adapter)?;
        tracing::debug!(host = %host, adapter = adapter.type_name(), "adapter registered");
        self.adapters.insert(host, adapter);
        Ok(self)
    }

    pub fn build(self) -> Registry {
        Registry {
            adapters: self.adapters,
        }
    }
}

lazy_static::lazy_static! {
    static ref STANDARD_REGISTRY: Registry = {
        let adapters: FxHashMap<HostType, Codec> = HostType::ALL
            .iter()
            .map(|host| (*host, host.standard_adapter()))
            .collect();
        tracing::debug!(adapters = adapters.len(), "standard registry initialised");
        Registry { adapters }
    };
}

/// Process-wide registry holding the standard adapter of every host type.
pub fn standard_registry() -> &'static Registry {
    &STANDARD_REGISTRY
}
