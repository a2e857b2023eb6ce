//! Core traits every queryable record type implements.
//!
//! `#[derive(Record)]` and `#[derive(Filter)]` generate these; the scalar
//! impls below cover every field type a record may declare.

use crate::{
    filter::{FilterNode, FilterValue},
    model::{FieldKind, ModelRef, RecordModel, schema_of},
    value::Value,
};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use ulid::Ulid;

///
/// FieldValue
///
/// Anything that can sit in a record field: reports its runtime kind and
/// lowers itself to a `Value`.
///

pub trait FieldValue {
    /// Runtime kind of the declared field type.
    fn kind() -> FieldKind
    where
        Self: Sized;

    fn to_value(&self) -> Value;

    /// Value reached by following `path` (field slots) from `self`.
    ///
    /// An empty path is the value itself. Returns `None` when the path steps
    /// through something that is not a record, including an absent optional.
    fn value_at(&self, path: &[usize]) -> Option<Value> {
        path.is_empty().then(|| self.to_value())
    }
}

///
/// Record
///
/// A named record type with a runtime schema.
///

pub trait Record: FieldValue + Sized + 'static {
    /// Fully-qualified type path.
    const PATH: &'static str;

    /// Build the runtime schema. Called once per type by the registry.
    fn describe() -> RecordModel;

    /// Registered schema for this type.
    #[must_use]
    fn model() -> &'static RecordModel {
        schema_of::<Self>()
    }

    /// Lazy handle used when another record nests this one.
    #[must_use]
    fn model_ref() -> ModelRef {
        ModelRef::new(schema_of::<Self>)
    }
}

///
/// Filter
///
/// A caller-side filter object: lowers itself to a `FilterNode`.
///

pub trait Filter {
    fn to_filter_node(&self) -> FilterNode;
}

impl Filter for FilterNode {
    fn to_filter_node(&self) -> FilterNode {
        self.clone()
    }
}

// An absent filter object constrains nothing.
impl<F: Filter> Filter for Option<F> {
    fn to_filter_node(&self) -> FilterNode {
        self.as_ref()
            .map_or_else(FilterNode::new, Filter::to_filter_node)
    }
}

impl<F: Filter> Filter for &F {
    fn to_filter_node(&self) -> FilterNode {
        (**self).to_filter_node()
    }
}

///
/// FilterInput
///
/// One field of a filter object.
///

pub trait FilterInput {
    fn to_filter_value(&self) -> FilterValue;
}

impl<T: FilterInput> FilterInput for Option<T> {
    fn to_filter_value(&self) -> FilterValue {
        self.as_ref()
            .map_or(FilterValue::Null, FilterInput::to_filter_value)
    }
}

impl<T: FilterInput> FilterInput for Box<T> {
    fn to_filter_value(&self) -> FilterValue {
        (**self).to_filter_value()
    }
}

impl<T: SetMember> FilterInput for Vec<T> {
    fn to_filter_value(&self) -> FilterValue {
        let mut values = Vec::with_capacity(self.len());
        for item in self {
            item.extend_set(&mut values);
        }

        FilterValue::Set(values)
    }
}

///
/// SetMember
///
/// Filter inputs that may appear inside a membership set. Nested filters are
/// not set members, so a `Vec` of filter objects is not a `FilterInput`.
///

pub trait SetMember {
    fn extend_set(&self, set: &mut Vec<Value>);
}

impl<T: SetMember> SetMember for Option<T> {
    fn extend_set(&self, set: &mut Vec<Value>) {
        match self {
            Some(item) => item.extend_set(set),
            None => set.push(Value::Null),
        }
    }
}

impl<T: SetMember> SetMember for Box<T> {
    fn extend_set(&self, set: &mut Vec<Value>) {
        (**self).extend_set(set);
    }
}

// nested sets flatten into the outer one
impl<T: SetMember> SetMember for Vec<T> {
    fn extend_set(&self, set: &mut Vec<Value>) {
        for item in self {
            item.extend_set(set);
        }
    }
}

impl SetMember for &str {
    fn extend_set(&self, set: &mut Vec<Value>) {
        set.push(Value::from(*self));
    }
}

impl SetMember for Value {
    fn extend_set(&self, set: &mut Vec<Value>) {
        match self {
            Self::List(items) => set.extend(items.iter().cloned()),
            other => set.push(other.clone()),
        }
    }
}

impl FilterInput for FilterNode {
    fn to_filter_value(&self) -> FilterValue {
        FilterValue::Node(self.clone())
    }
}

impl FilterInput for FilterValue {
    fn to_filter_value(&self) -> FilterValue {
        self.clone()
    }
}

// ============================================================================
// SCALAR IMPLS
// ============================================================================

macro_rules! impl_scalar_field {
    ( $( $type:ty => $kind:ident ),* $(,)? ) => {
        $(
            impl FieldValue for $type {
                fn kind() -> FieldKind {
                    FieldKind::$kind
                }

                fn to_value(&self) -> Value {
                    Value::from(self.clone())
                }
            }

            impl FilterInput for $type {
                fn to_filter_value(&self) -> FilterValue {
                    FilterValue::Scalar(Value::from(self.clone()))
                }
            }

            impl SetMember for $type {
                fn extend_set(&self, set: &mut Vec<Value>) {
                    set.push(Value::from(self.clone()));
                }
            }
        )*
    };
}

impl_scalar_field! {
    bool          => Bool,
    char          => Char,
    i8            => Int,
    i16           => Int,
    i32           => Int,
    i64           => Int,
    u8            => Uint,
    u16           => Uint,
    u32           => Uint,
    u64           => Uint,
    f32           => Float32,
    f64           => Float64,
    Decimal       => Decimal,
    String        => Text,
    NaiveDate     => Date,
    NaiveDateTime => Timestamp,
    Ulid          => Ulid,
}

impl FilterInput for &str {
    fn to_filter_value(&self) -> FilterValue {
        FilterValue::Scalar(Value::from(*self))
    }
}

impl FilterInput for Value {
    fn to_filter_value(&self) -> FilterValue {
        match self {
            Value::Null => FilterValue::Null,
            Value::List(items) => FilterValue::Set(items.clone()),
            other => FilterValue::Scalar(other.clone()),
        }
    }
}

// ============================================================================
// WRAPPER IMPLS
// ============================================================================

// Nullability is not part of the kind: an absent value is `Value::Null`.
impl<T: FieldValue> FieldValue for Option<T> {
    fn kind() -> FieldKind {
        T::kind()
    }

    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, FieldValue::to_value)
    }

    fn value_at(&self, path: &[usize]) -> Option<Value> {
        match self {
            Some(inner) => inner.value_at(path),
            None if path.is_empty() => Some(Value::Null),
            None => None,
        }
    }
}

impl<T: FieldValue> FieldValue for Box<T> {
    fn kind() -> FieldKind {
        T::kind()
    }

    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn value_at(&self, path: &[usize]) -> Option<Value> {
        (**self).value_at(path)
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn kind() -> FieldKind {
        FieldKind::List(Box::new(T::kind()))
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldValue::to_value).collect())
    }
}
