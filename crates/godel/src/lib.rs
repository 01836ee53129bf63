//! Godel: exact bijections between structured values and the natural numbers.
//!
//! Every encodable type has a size (finite `N` or infinite) and a pair of
//! mutually inverse functions: `encode` maps a value to a unique natural
//! below its size, `decode` maps every such natural back to exactly one
//! value. Composite types are assembled from smaller ones, so records,
//! unions, lists and rationals all get dense numberings with no gaps and
//! no collisions.
//!
//! # Quick Start
//!
//! ```rust
//! use godel::{standard_registry, Bijectable, HostType, Product, Record, Value};
//! use godel::codec::integers;
//! use num_bigint::{BigInt, BigUint};
//!
//! let point = Product::builder("Point")
//!     .field("x", integers())
//!     .field("y", integers())
//!     .field("visible", HostType::Bool)
//!     .build(standard_registry())
//!     .unwrap();
//!
//! let value: Value = Record::new("Point")
//!     .with("x", BigInt::from(-3))
//!     .with("y", BigInt::from(4))
//!     .with("visible", true)
//!     .into();
//!
//! let code = point.encode(&value).unwrap();
//! assert_eq!(point.decode(&code).unwrap(), value);
//!
//! // every natural is a valid point
//! let any = point.decode(&BigUint::from(123_456u32)).unwrap();
//! assert_eq!(point.encode(&any).unwrap(), BigUint::from(123_456u32));
//! ```
//!
//! # Modules
//!
//! - [`pairing`]: the arithmetic core (mixed radix, pairing functions,
//!   combinatorial list numbering)
//! - [`codec`]: the [`Bijectable`] trait, leaf codecs and combinators
//! - [`model`]: values, sizes and fractions
//! - [`registry`]: adapters that stand in for bare host types
//! - [`validate`]: round-trip self-checks
//! - [`error`]: error types
//!
//! # Concurrency
//!
//! Codecs are immutable once assembled and hold no interior state, so a
//! [`Codec`] can be shared across threads and used concurrently without
//! locking.

pub mod codec;
pub mod error;
pub mod model;
pub mod pairing;
pub mod registry;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{
    AlphabetString, Bijectable, Codec, CodecOptions, Derive, Enumeration, ListCodec, Product,
    Rational, Union,
};
pub use error::{DomainError, ErrorKind, RangeError, SchemaError, ValidationError};
pub use model::{Fraction, List, Name, Newtype, Record, Size, Symbol, Text, Value};
pub use pairing::PairingStrategy;
pub use registry::{standard_registry, FieldType, HostType, Registry, RegistryBuilder};
pub use validate::{verify_codes, verify_values};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
