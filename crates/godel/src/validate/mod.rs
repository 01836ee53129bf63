//! Round-trip self-checks for codecs.
//!
//! A codec is only correct if encode and decode are exact inverses. These
//! checks exercise that property exhaustively over a prefix of the
//! codomain, or over a caller-supplied sample of the domain, and report the
//! first violation.

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

use crate::codec::Bijectable;
use crate::error::ValidationError;
use crate::model::{Size, Value};

/// Checks `encode(decode(c)) == c` for every code `c < min(bound, size)`.
///
/// Returns the number of codes checked.
pub fn verify_codes(codec: &dyn Bijectable, bound: u64) -> Result<u64, ValidationError> {
    let limit = match codec.size() {
        Size::Finite(n) => n.to_u64().map_or(bound, |n| n.min(bound)),
        Size::Infinite => bound,
    };

    let mut code = BigUint::zero();
    for _ in 0..limit {
        let value = codec.decode(&code)?;
        let reencoded = codec.encode(&value)?;
        if reencoded != code {
            return Err(ValidationError::CodeMismatch {
                type_name: codec.type_name().to_string(),
                code: code.to_string(),
                reencoded: reencoded.to_string(),
            });
        }
        code += 1u32;
    }

    tracing::debug!(type_name = codec.type_name(), checked = limit, "codes verified");
    Ok(limit)
}

/// Checks `decode(encode(v)) == v` for every value in `values`.
///
/// Returns the number of values checked.
pub fn verify_values<'a>(
    codec: &dyn Bijectable,
    values: impl IntoIterator<Item = &'a Value>,
) -> Result<usize, ValidationError> {
    let mut checked = 0;
    for value in values {
        let code = codec.encode(value)?;
        let decoded = codec.decode(&code)?;
        if decoded != *value {
            return Err(ValidationError::ValueMismatch {
                type_name: codec.type_name().to_string(),
                value: value.to_string(),
                decoded: decoded.to_string(),
            });
        }
        checked += 1;
    }
    Ok(checked)
}
