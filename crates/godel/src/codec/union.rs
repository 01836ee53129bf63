//! Tagged unions over a set of member types.
//!
//! Members are deduplicated by type name and put in lexicographic order,
//! so the layout depends only on the member set. Finite members occupy
//! abutting code ranges first; infinite members are interleaved
//! round-robin after the last finite range.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::Arc;

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use rustc_hash::FxHashMap;
use sha2::{Digest, Sha256};

use crate::codec::{check_code, Bijectable, Codec};
use crate::error::{DomainError, RangeError, SchemaError};
use crate::model::{Name, Size, Value};
use crate::pairing::{merge, unmerge};
use crate::registry::{FieldType, Registry};

/// Builder for [`Union`] codecs.
#[derive(Debug, Clone, Default)]
pub struct UnionBuilder {
    members: Vec<FieldType>,
}

impl UnionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a member. Repeating a member is allowed and has no effect.
    pub fn member(mut self, ty: impl Into<FieldType>) -> Self {
        self.members.push(ty.into());
        self
    }

    /// Resolves every member against `registry` and assembles the codec.
    ///
    /// Fails if two different codecs share a type name, or if a value type
    /// would belong to more than one member (a nested union that repeats a
    /// sibling member).
    pub fn build(self, registry: &Registry) -> Result<Union, SchemaError> {
        let mut members: BTreeMap<String, Codec> = BTreeMap::new();
        for (position, ty) in self.members.iter().enumerate() {
            let codec = registry.resolve(ty, &format!("member {}", position))?;
            match members.entry(codec.type_name().to_string()) {
                Entry::Vacant(entry) => {
                    entry.insert(codec);
                }
                Entry::Occupied(entry) => {
                    let existing = entry.get();
                    if !Arc::ptr_eq(existing, &codec) && existing.size() != codec.size() {
                        return Err(SchemaError::ConflictingMember {
                            type_name: entry.key().clone(),
                        });
                    }
                }
            }
        }
        if members.is_empty() {
            return Err(SchemaError::EmptyUnion);
        }
        Union::assemble(members.into_values().collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Finite(usize),
    Infinite(usize),
}

/// Codec for values of any one of a fixed set of member types.
#[derive(Debug, Clone)]
pub struct Union {
    name: Name,
    /// All members in canonical order.
    members: Vec<Codec>,
    finite: Vec<Codec>,
    /// `starts[i]` is the first code of finite member `i`; the last entry
    /// is the total finite width.
    starts: Vec<BigUint>,
    infinite: Vec<Codec>,
    infinite_count: BigUint,
    /// Value type to member; a nested union maps each of its own value
    /// types to the slot it occupies here.
    slots: FxHashMap<Name, Slot>,
    size: Size,
}

impl Union {
    pub fn builder() -> UnionBuilder {
        UnionBuilder::new()
    }

    /// `members` must be non-empty, deduplicated and sorted by name.
    fn assemble(members: Vec<Codec>) -> Result<Self, SchemaError> {
        let name = Name::from(union_name(&members));
        let mut finite = Vec::new();
        let mut infinite = Vec::new();
        let mut starts = vec![BigUint::zero()];
        let mut slots = FxHashMap::default();

        for member in &members {
            let slot = match member.size() {
                Size::Finite(n) => {
                    let next = starts.last().map_or_else(BigUint::zero, |s| s + n);
                    starts.push(next);
                    finite.push(member.clone());
                    Slot::Finite(finite.len() - 1)
                }
                Size::Infinite => {
                    infinite.push(member.clone());
                    Slot::Infinite(infinite.len() - 1)
                }
            };
            for value_type in member.value_types() {
                if slots.insert(Name::from(value_type), slot).is_some() {
                    return Err(SchemaError::AmbiguousMember {
                        type_name: value_type.to_string(),
                    });
                }
            }
        }

        let infinite_count = BigUint::from(infinite.len());
        let size = if infinite.is_empty() {
            Size::Finite(starts.last().cloned().unwrap_or_default())
        } else {
            Size::Infinite
        };

        tracing::debug!(
            name = %name,
            finite = finite.len(),
            infinite = infinite.len(),
            size = %size,
            "union assembled"
        );

        Ok(Self {
            name,
            members,
            finite,
            starts,
            infinite,
            infinite_count,
            slots,
            size,
        })
    }

    /// Members in canonical order.
    pub fn members(&self) -> &[Codec] {
        &self.members
    }

    /// Convenience for wrapping the codec in a shared handle.
    pub fn into_codec(self) -> Codec {
        Arc::new(self)
    }

    /// Total width of the finite ranges.
    fn finite_sum(&self) -> &BigUint {
        &self.starts[self.finite.len()]
    }
}

impl Bijectable for Union {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> &Size {
        &self.size
    }

    fn value_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.slots.keys().map(|name| &**name).collect();
        types.sort_unstable();
        types
    }

    fn encode(&self, value: &Value) -> Result<BigUint, DomainError> {
        let slot = self.slots.get(value.type_name()).ok_or_else(|| DomainError::NotAMember {
            union: self.name.to_string(),
            found: value.type_name().to_string(),
        })?;
        match *slot {
            Slot::Finite(i) => Ok(&self.starts[i] + self.finite[i].encode(value)?),
            Slot::Infinite(i) => {
                let inner = self.infinite[i].encode(value)?;
                let tag = BigUint::from(i);
                Ok(self.finite_sum() + merge(&tag, &inner, &self.infinite_count))
            }
        }
    }

    fn decode(&self, code: &BigUint) -> Result<Value, RangeError> {
        check_code(self, code)?;
        let finite_sum = self.finite_sum();
        if code < finite_sum {
            // starts[0] = 0 ≤ code, so the partition point is at least 1
            let i = self.starts.partition_point(|start| start <= code) - 1;
            return self.finite[i].decode(&(code - &self.starts[i]));
        }
        let (tag, inner) = unmerge(&(code - finite_sum), &self.infinite_count);
        let member = tag
            .to_usize()
            .and_then(|i| self.infinite.get(i))
            .ok_or_else(|| RangeError::CodeOutOfRange {
                type_name: self.name.to_string(),
                code: code.to_string(),
                size: self.size.to_string(),
            })?;
        member.decode(&inner)
    }
}

/// `Union_` plus eight hex digits of the SHA-256 of the canonical member
/// names.
fn union_name(members: &[Codec]) -> String {
    let mut hasher = Sha256::new();
    for (i, member) in members.iter().enumerate() {
        if i > 0 {
            hasher.update(b"|");
        }
        hasher.update(member.type_name().as_bytes());
    }
    let digest = hasher.finalize();
    let mut name = String::from("Union_");
    for byte in &digest[..4] {
        let _ = write!(name, "{:02x}", byte);
    }
    name
}
