mod coerce;
mod compare;
mod rank;

#[cfg(test)]
mod tests;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};
use ulid::Ulid;

// re-exports
pub use coerce::coerce_literal;

///
/// Value
/// Runtime literal used by predicates, sort keys and projected rows.
///
/// Null        → the field's value is Option::None.
/// List        → ordered values of a collection field or a membership set.
/// Record      → field values of a nested record, in declared field order.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Value {
    Null,
    Bool(bool),
    Char(char),
    Int(i64),
    Uint(u64),
    Float32(f32),
    Float64(f64),
    Decimal(Decimal),
    Text(String),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    Ulid(Ulid),
    List(Vec<Self>),
    Record(Vec<Self>),
}

impl Value {
    ///
    /// CONSTRUCTION
    ///

    /// Build a `Value::List` from owned items.
    pub fn from_list<T>(items: impl IntoIterator<Item = T>) -> Self
    where
        T: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    ///
    /// TYPES
    ///

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    ///
    /// COMPARISON
    ///

    /// Strict equality: both sides must be the same variant.
    #[must_use]
    pub fn strict_eq(&self, other: &Self) -> bool {
        compare::strict_eq(self, other)
    }

    /// Total canonical comparator used by sort keys.
    #[must_use]
    pub fn canonical_cmp(left: &Self, right: &Self) -> Ordering {
        compare::canonical_cmp(left, right)
    }

    /// Stable canonical rank used by cross-variant ordering.
    #[must_use]
    pub(crate) const fn canonical_rank(&self) -> u8 {
        rank::canonical_rank(self)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "'{}'", v.escape_default()),
            Self::Int(v) => write!(f, "{v}"),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Float32(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "'{}'", v.replace('\'', "''")),
            Self::Date(v) => write!(f, "'{v}'"),
            Self::Timestamp(v) => write!(f, "'{v}'"),
            Self::Ulid(v) => write!(f, "'{v}'"),
            Self::List(items) | Self::Record(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}

macro_rules! impl_from_for {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for Value {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_for! {
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
    &str          => Text,
    NaiveDate     => Date,
    NaiveDateTime => Timestamp,
    Ulid          => Ulid,
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::List(items)
    }
}
