//! Transport of an existing codec across a declared isomorphism.

use std::fmt;
use std::sync::Arc;

use num_bigint::BigUint;

use crate::codec::{check_type, Bijectable, Codec};
use crate::error::{DomainError, RangeError};
use crate::model::{Name, Size, Value};

/// Conversion from the derived type into the auxiliary type.
pub type ToAux = Arc<dyn Fn(&Value) -> Result<Value, DomainError> + Send + Sync>;

/// Conversion from the auxiliary type back into the derived type.
pub type FromAux = Arc<dyn Fn(Value) -> Result<Value, RangeError> + Send + Sync>;

/// Codec for a type `A` declared isomorphic to the type `B` of `aux`.
///
/// `encode(a) = aux.encode(to_aux(a))`, `decode(c) = from_aux(aux.decode(c))`
/// and `size(A) = size(B)`. The conversions must be exact inverses over
/// the whole domain of `A`; the codec cannot check that, but it does
/// check on every encode that `to_aux` produced a value of exactly type
/// `B` (or of a member type, when `B` is a union).
#[derive(Clone)]
pub struct Derive {
    name: Name,
    aux: Codec,
    to_aux: ToAux,
    from_aux: FromAux,
}

impl Derive {
    pub fn new<F, G>(name: impl Into<Name>, aux: Codec, to_aux: F, from_aux: G) -> Self
    where
        F: Fn(&Value) -> Result<Value, DomainError> + Send + Sync + 'static,
        G: Fn(Value) -> Result<Value, RangeError> + Send + Sync + 'static,
    {
        let name = name.into();
        tracing::debug!(name = %name, aux = aux.type_name(), size = %aux.size(), "derived codec assembled");
        Self {
            name,
            aux,
            to_aux: Arc::new(to_aux),
            from_aux: Arc::new(from_aux),
        }
    }

    /// The codec this one is transported from.
    pub fn aux(&self) -> &Codec {
        &self.aux
    }

    /// Converts a decoded auxiliary value without going through a code.
    pub fn from_aux(&self, aux_value: Value) -> Result<Value, RangeError> {
        (self.from_aux)(aux_value)
    }

    /// Converts a value into its auxiliary form, checking the result type.
    pub fn to_aux(&self, value: &Value) -> Result<Value, DomainError> {
        check_type(self, value)?;
        let aux_value = (self.to_aux)(value)?;
        if !self.aux.value_types().contains(&aux_value.type_name()) {
            return Err(DomainError::AuxTypeMismatch {
                derived: self.name.to_string(),
                expected: self.aux.type_name().to_string(),
                found: aux_value.type_name().to_string(),
            });
        }
        Ok(aux_value)
    }
}

impl fmt::Debug for Derive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Derive")
            .field("name", &self.name)
            .field("aux", &self.aux.type_name())
            .finish_non_exhaustive()
    }
}

impl Bijectable for Derive {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> &Size {
        self.aux.size()
    }

    fn encode(&self, value: &Value) -> Result<BigUint, DomainError> {
        let aux_value = self.to_aux(value)?;
        self.aux.encode(&aux_value)
    }

    fn decode(&self, code: &BigUint) -> Result<Value, RangeError> {
        let aux_value = self.aux.decode(code)?;
        (self.from_aux)(aux_value)
    }
}

/// Error for a `from_aux` that received something other than the
/// auxiliary type.
pub(crate) fn malformed(type_name: &str, context: &'static str) -> RangeError {
    RangeError::MalformedAux {
        type_name: type_name.to_string(),
        context,
    }
}
