use crate::{
    error::{QueryError, SchemaError},
    model::{FieldKind, FieldModel},
};
use std::collections::{HashMap, hash_map::Entry};

///
/// RecordModel
///
/// Runtime schema for one record type: an ordered field list plus a
/// precomputed case-folded lookup table. Built once per type (or per
/// projection shape) and immutable afterwards.
///

#[derive(Clone, Debug)]
pub struct RecordModel {
    /// Fully-qualified type path (for identity and diagnostics).
    pub path: String,
    /// Short type name used in error messages.
    pub name: String,
    fields: Vec<FieldModel>,
    lookup: HashMap<String, usize>,
}

impl RecordModel {
    /// Build a model, rejecting field names that collide case-insensitively.
    pub fn try_new(
        path: impl Into<String>,
        name: impl Into<String>,
        fields: Vec<FieldModel>,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        let mut lookup = HashMap::with_capacity(fields.len());

        for (slot, field) in fields.iter().enumerate() {
            match lookup.entry(casefold(&field.name)) {
                Entry::Vacant(entry) => {
                    entry.insert(slot);
                }
                Entry::Occupied(entry) => {
                    return Err(SchemaError::DuplicateField {
                        type_name: name,
                        first: fields[*entry.get()].name.clone(),
                        second: field.name.clone(),
                    });
                }
            }
        }

        Ok(Self {
            path: path.into(),
            name,
            fields,
            lookup,
        })
    }

    /// Build a model whose field names were already checked for collisions.
    ///
    /// Used by `#[derive(Record)]`, which rejects colliding names at compile
    /// time. If a collision slips through anyway the first declared field wins.
    #[doc(hidden)]
    #[must_use]
    pub fn from_validated(
        path: impl Into<String>,
        name: impl Into<String>,
        fields: Vec<FieldModel>,
    ) -> Self {
        let mut lookup = HashMap::with_capacity(fields.len());
        for (slot, field) in fields.iter().enumerate() {
            lookup.entry(casefold(&field.name)).or_insert(slot);
        }

        Self {
            path: path.into(),
            name: name.into(),
            fields,
            lookup,
        }
    }

    /// Ordered field list (declaration order).
    #[must_use]
    pub fn fields(&self) -> &[FieldModel] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, slot: usize) -> Option<&FieldModel> {
        self.fields.get(slot)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Case-insensitive field lookup.
    #[must_use]
    pub fn find(&self, field: &str) -> Option<ResolvedField> {
        let slot = *self.lookup.get(&casefold(field))?;
        let model = &self.fields[slot];

        Some(ResolvedField {
            slot,
            name: model.name.clone(),
            kind: model.kind.clone(),
        })
    }

    /// Case-insensitive field lookup that fails with `FieldNotFound`.
    pub fn resolve(&self, field: &str) -> Result<ResolvedField, QueryError> {
        self.find(field)
            .ok_or_else(|| QueryError::field_not_found(&self.name, field))
    }

    /// Exact (case-sensitive) slot lookup.
    #[must_use]
    pub fn slot_exact(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == field)
    }
}

///
/// ResolvedField
///
/// A field name bound to its slot and kind on one model.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ResolvedField {
    pub slot: usize,
    /// Canonical (declared) field name, regardless of the casing used to
    /// look it up.
    pub name: String,
    pub kind: FieldKind,
}

// Case folding used by every field lookup.
pub(crate) fn casefold(input: &str) -> String {
    if input.is_ascii() {
        return input.to_ascii_lowercase();
    }

    input.to_lowercase()
}
