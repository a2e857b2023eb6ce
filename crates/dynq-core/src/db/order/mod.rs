//! Sort Compiler.
//!
//! Resolves field names into ordering keys and chains them. The first key
//! establishes the primary order; every later key only breaks ties left by
//! the keys before it.

#[cfg(test)]
mod tests;

use crate::{
    db::Direction,
    error::QueryError,
    model::{RecordModel, ResolvedField},
    traits::FieldValue,
    value::Value,
};
use std::{cmp::Ordering, fmt};

///
/// SortKey
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SortKey {
    pub field: ResolvedField,
    pub direction: Direction,
}

impl SortKey {
    /// Resolve `field` on `model` into an ordering key.
    pub fn resolve(
        model: &RecordModel,
        field: &str,
        direction: Direction,
    ) -> Result<Self, QueryError> {
        let field = model.resolve(field)?;
        if !field.kind.is_orderable() {
            return Err(QueryError::UnorderableField {
                type_name: model.name.clone(),
                field: field.name,
                kind: field.kind,
            });
        }

        Ok(Self { field, direction })
    }

    fn extract<R: FieldValue>(&self, row: &R) -> Value {
        row.value_at(&[self.field.slot]).unwrap_or(Value::Null)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field.name, self.direction)
    }
}

///
/// OrderSpec
///
/// Ordered list of sort keys. Keys are only ever appended.
///

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct OrderSpec {
    keys: Vec<SortKey>,
}

impl OrderSpec {
    #[must_use]
    pub const fn new() -> Self {
        Self { keys: Vec::new() }
    }

    #[must_use]
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Stable sort: rows that tie on every key keep their input order.
    #[must_use]
    pub fn sort<R: FieldValue>(&self, rows: Vec<R>) -> Vec<R> {
        if self.keys.is_empty() {
            return rows;
        }

        // extract each row's key values once
        let mut keyed: Vec<(Vec<Value>, R)> = rows
            .into_iter()
            .map(|row| {
                let values = self.keys.iter().map(|key| key.extract(&row)).collect();
                (values, row)
            })
            .collect();
        keyed.sort_by(|(left, _), (right, _)| self.compare_extracted(left, right));

        keyed.into_iter().map(|(_, row)| row).collect()
    }

    // Composite comparison: first non-equal key decides.
    fn compare_extracted(&self, left: &[Value], right: &[Value]) -> Ordering {
        self.keys
            .iter()
            .zip(left.iter().zip(right))
            .map(|(key, (l, r))| key.direction.apply(Value::canonical_cmp(l, r)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl fmt::Display for OrderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

/// Start a new ordering on `field`.
pub fn primary(
    model: &RecordModel,
    field: &str,
    direction: Direction,
) -> Result<OrderSpec, QueryError> {
    let key = SortKey::resolve(model, field, direction)?;
    tracing::debug!(record = %model.name, key = %key, "compiled primary sort key");

    Ok(OrderSpec { keys: vec![key] })
}

/// Append a tie-break on `field` after every existing key.
pub fn secondary(
    mut spec: OrderSpec,
    model: &RecordModel,
    field: &str,
    direction: Direction,
) -> Result<OrderSpec, QueryError> {
    let key = SortKey::resolve(model, field, direction)?;
    tracing::debug!(
        record = %model.name,
        key = %key,
        position = spec.keys.len(),
        "compiled secondary sort key"
    );
    spec.keys.push(key);

    Ok(spec)
}
