//! Records with a fixed, ordered list of named fields.
//!
//! Finite fields are packed in mixed radix into `fin ∈ [0, M)`, infinite
//! fields are ranked as a tuple into `inf`, and the two are merged as
//! `M·inf + fin`.

use std::sync::Arc;

use num_bigint::BigUint;
use rustc_hash::FxHashSet;

use crate::codec::{check_code, check_type, Bijectable, Codec};
use crate::error::{DomainError, RangeError, SchemaError};
use crate::model::{Name, Record, Size, Value};
use crate::pairing::{f_to_flist, flist_to_f, i_to_ilist, ilist_to_i, merge, radix_product, unmerge};
use crate::registry::{FieldType, Registry};

/// A declared field and its resolved codec.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: Name,
    pub codec: Codec,
}

/// Builder for [`Product`] codecs.
#[derive(Debug, Clone)]
pub struct ProductBuilder {
    name: Name,
    fields: Vec<(Name, FieldType)>,
}

impl ProductBuilder {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Declares the next field.
    pub fn field(mut self, name: impl Into<Name>, ty: impl Into<FieldType>) -> Self {
        self.fields.push((name.into(), ty.into()));
        self
    }

    /// Resolves every field type against `registry` and assembles the
    /// codec.
    pub fn build(self, registry: &Registry) -> Result<Product, SchemaError> {
        let mut seen = FxHashSet::default();
        let mut fields = Vec::with_capacity(self.fields.len());
        for (name, ty) in self.fields {
            if !seen.insert(name.clone()) {
                return Err(SchemaError::DuplicateField {
                    type_name: self.name.to_string(),
                    field: name.to_string(),
                });
            }
            let codec = registry.resolve(&ty, &name)?;
            fields.push(Field { name, codec });
        }
        Ok(Product::assemble(self.name, fields))
    }
}

/// Codec for records of one declared shape.
#[derive(Debug, Clone)]
pub struct Product {
    name: Name,
    fields: Vec<Field>,
    /// Field indices of finite fields, in declaration order.
    finite: Vec<usize>,
    /// Field indices of infinite fields, in declaration order.
    infinite: Vec<usize>,
    finite_maxes: Vec<BigUint>,
    /// `M`, the product of all finite field sizes.
    finite_total: BigUint,
    size: Size,
}

impl Product {
    pub fn builder(name: impl Into<Name>) -> ProductBuilder {
        ProductBuilder::new(name)
    }

    fn assemble(name: Name, fields: Vec<Field>) -> Self {
        let mut finite = Vec::new();
        let mut infinite = Vec::new();
        let mut finite_maxes = Vec::new();
        for (index, field) in fields.iter().enumerate() {
            match field.codec.size() {
                Size::Finite(n) => {
                    finite.push(index);
                    finite_maxes.push(n.clone());
                }
                Size::Infinite => infinite.push(index),
            }
        }
        let finite_total = radix_product(&finite_maxes);
        let size = if infinite.is_empty() {
            Size::Finite(finite_total.clone())
        } else {
            Size::Infinite
        };

        tracing::debug!(
            name = %name,
            finite = finite.len(),
            infinite = infinite.len(),
            size = %size,
            "product assembled"
        );

        Self {
            name,
            fields,
            finite,
            infinite,
            finite_maxes,
            finite_total,
            size,
        }
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Convenience for wrapping the codec in a shared handle.
    pub fn into_codec(self) -> Codec {
        Arc::new(self)
    }

    /// Encodes a record's fields in declaration order.
    fn field_codes(&self, record: &Record) -> Result<Vec<BigUint>, DomainError> {
        let mut seen = FxHashSet::default();
        for (name, _) in &record.fields {
            if !self.fields.iter().any(|field| field.name == *name) {
                return Err(DomainError::UnexpectedField {
                    type_name: self.name.to_string(),
                    field: name.to_string(),
                });
            }
            if !seen.insert(name) {
                return Err(DomainError::DuplicateField {
                    type_name: self.name.to_string(),
                    field: name.to_string(),
                });
            }
        }

        self.fields
            .iter()
            .map(|field| {
                let value = record.get(&field.name).ok_or_else(|| DomainError::MissingField {
                    type_name: self.name.to_string(),
                    field: field.name.to_string(),
                })?;
                field.codec.encode(value)
            })
            .collect()
    }
}

impl Bijectable for Product {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> &Size {
        &self.size
    }

    fn encode(&self, value: &Value) -> Result<BigUint, DomainError> {
        check_type(self, value)?;
        let Value::Record(record) = value else {
            return Err(DomainError::TypeMismatch {
                codec: self.name.to_string(),
                found: value.type_name().to_string(),
            });
        };
        let codes = self.field_codes(record)?;

        let finite_codes: Vec<BigUint> = self.finite.iter().map(|&i| codes[i].clone()).collect();
        let infinite_codes: Vec<BigUint> =
            self.infinite.iter().map(|&i| codes[i].clone()).collect();

        let fin = flist_to_f(&finite_codes, &self.finite_maxes);
        let inf = ilist_to_i(&infinite_codes);
        Ok(merge(&fin, &inf, &self.finite_total))
    }

    fn decode(&self, code: &BigUint) -> Result<Value, RangeError> {
        check_code(self, code)?;
        let (fin, inf) = unmerge(code, &self.finite_total);
        let finite_codes = f_to_flist(&fin, &self.finite_maxes, self.finite.len());
        let infinite_codes = i_to_ilist(&inf, self.infinite.len());

        let mut decoded = Vec::with_capacity(self.fields.len());
        for (&index, code) in self.finite.iter().zip(&finite_codes) {
            decoded.push((index, self.fields[index].codec.decode(code)?));
        }
        for (&index, code) in self.infinite.iter().zip(&infinite_codes) {
            decoded.push((index, self.fields[index].codec.decode(code)?));
        }
        decoded.sort_by_key(|(index, _)| *index);

        let fields = decoded
            .into_iter()
            .map(|(index, value)| (self.fields[index].name.clone(), value))
            .collect();
        Ok(Value::Record(Record {
            ty: self.name.clone(),
            fields,
        }))
    }
}
