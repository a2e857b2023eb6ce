use crate::{model::RecordModel, value::Value};
use serde::{Serialize, Serializer, ser::SerializeMap};
use std::{fmt, sync::Arc};

///
/// ProjectedRow
///
/// One row of a multi-field projection: values in shape order, looked up by
/// name through the shape (case-insensitive).
///

#[derive(Clone, Debug)]
pub struct ProjectedRow {
    shape: Arc<RecordModel>,
    values: Vec<Value>,
}

impl ProjectedRow {
    pub(crate) const fn new(shape: Arc<RecordModel>, values: Vec<Value>) -> Self {
        Self { shape, values }
    }

    #[must_use]
    pub fn shape(&self) -> &RecordModel {
        &self.shape
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        let resolved = self.shape.find(field)?;

        self.values.get(resolved.slot)
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// (name, value) pairs in shape order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.shape
            .fields()
            .iter()
            .map(|field| field.name.as_str())
            .zip(&self.values)
    }
}

// Rows are equal when they carry the same named values in the same order.
impl PartialEq for ProjectedRow {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl fmt::Display for ProjectedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        write!(f, "}}")
    }
}

impl Serialize for ProjectedRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
