//! Projection Compiler.
//!
//! `project_single` maps a row to one bare field value. `project_many`
//! synthesizes a reduced record shape (itself a `RecordModel`, reused through
//! the shape cache) and maps rows into it.

mod cache;
mod row;


pub use cache::{
    CacheStats, ShapeSignature, shape_cache_stats, with_shape_cache_disabled,
    with_shape_cache_enabled,
};
pub use row::ProjectedRow;

use crate::{
    error::QueryError,
    model::{FieldModel, RecordModel, ResolvedField},
    obs::sink::{MetricsEvent, record},
    traits::FieldValue,
    value::Value,
};
use std::{collections::HashSet, sync::Arc};

///
/// FieldProjection
/// One field, returned bare per row.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldProjection {
    field: ResolvedField,
}

impl FieldProjection {
    #[must_use]
    pub const fn field(&self) -> &ResolvedField {
        &self.field
    }

    #[must_use]
    pub fn apply<R: FieldValue>(&self, row: &R) -> Value {
        row.value_at(&[self.field.slot]).unwrap_or(Value::Null)
    }
}

///
/// ShapeProjection
/// Reduced shape plus the source slot feeding each of its fields.
///

#[derive(Clone, Debug)]
pub struct ShapeProjection {
    shape: Arc<RecordModel>,
    slots: Vec<usize>,
}

impl ShapeProjection {
    #[must_use]
    pub fn shape(&self) -> &Arc<RecordModel> {
        &self.shape
    }

    /// Source slot for each shape field, in shape order.
    #[must_use]
    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    #[must_use]
    pub fn apply<R: FieldValue>(&self, row: &R) -> ProjectedRow {
        let values = self
            .slots
            .iter()
            .map(|slot| row.value_at(&[*slot]).unwrap_or(Value::Null))
            .collect();

        ProjectedRow::new(Arc::clone(&self.shape), values)
    }
}

/// Resolve a single-field projection.
pub fn project_single(model: &RecordModel, field: &str) -> Result<FieldProjection, QueryError> {
    let field = model.resolve(field)?;
    tracing::debug!(record = %model.name, field = %field.name, "compiled field projection");

    Ok(FieldProjection { field })
}

/// Resolve a multi-field projection.
///
/// Every requested name is validated before any shape is built; the first
/// failure wins. Field order follows the request, names are canonical.
pub fn project_many<S: AsRef<str>>(
    model: &RecordModel,
    fields: &[S],
) -> Result<ShapeProjection, QueryError> {
    if fields.is_empty() {
        return Err(QueryError::EmptyProjection {
            type_name: model.name.clone(),
        });
    }

    let mut seen = HashSet::with_capacity(fields.len());
    let mut resolved = Vec::with_capacity(fields.len());
    for requested in fields {
        let field = model.resolve(requested.as_ref())?;
        if !seen.insert(field.slot) {
            return Err(QueryError::DuplicateProjectionField {
                type_name: model.name.clone(),
                field: field.name,
            });
        }
        resolved.push(field);
    }

    let slots = resolved.iter().map(|field| field.slot).collect();
    let signature = ShapeSignature::new(
        resolved
            .into_iter()
            .map(|field| FieldModel::new(field.name, field.kind))
            .collect(),
    );
    let (shape, hit) = cache::shape_for(signature);
    record(MetricsEvent::ShapeCache { hit });

    tracing::debug!(
        record = %model.name,
        shape = %shape.name,
        cached = hit,
        "compiled shape projection"
    );

    Ok(ShapeProjection { shape, slots })
}
