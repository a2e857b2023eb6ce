use crate::{model::FieldKind, value::Value};
use std::fmt;
use thiserror::Error as ThisError;

///
/// QueryError
///
/// Every failure the compilers can raise. All variants are produced while
/// composing a query, before the data source is touched, except `Source`.
///

#[derive(Debug, ThisError)]
pub enum QueryError {
    #[error("type [{type_name}] does not have field [{field}]")]
    FieldNotFound { type_name: String, field: String },

    #[error(
        "filter field [{field}] on type [{type_name}] expects {expected}, but the filter supplies {found}"
    )]
    FilterShapeMismatch {
        type_name: String,
        field: String,
        expected: String,
        found: &'static str,
    },

    #[error("filter literal {value} is not a valid {kind} for field [{field}] on type [{type_name}]")]
    LiteralTypeMismatch {
        type_name: String,
        field: String,
        kind: FieldKind,
        value: Value,
    },

    #[error("field [{field}] on type [{type_name}] cannot be ordered ({kind})")]
    UnorderableField {
        type_name: String,
        field: String,
        kind: FieldKind,
    },

    #[error("field [{field}] is selected more than once from type [{type_name}]")]
    DuplicateProjectionField { type_name: String, field: String },

    #[error("projection over type [{type_name}] requires at least one field")]
    EmptyProjection { type_name: String },

    #[error("{0}")]
    Schema(#[from] SchemaError),

    #[error("{0}")]
    Filter(#[from] FilterError),

    #[error("{0}")]
    Source(#[from] SourceError),
}

impl QueryError {
    pub(crate) fn field_not_found(type_name: &str, field: &str) -> Self {
        Self::FieldNotFound {
            type_name: type_name.to_string(),
            field: field.to_string(),
        }
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::FieldNotFound { .. } => ErrorClass::NotFound,
            Self::FilterShapeMismatch { .. }
            | Self::LiteralTypeMismatch { .. }
            | Self::UnorderableField { .. }
            | Self::Filter(_) => ErrorClass::Unsupported,
            Self::DuplicateProjectionField { .. }
            | Self::EmptyProjection { .. }
            | Self::Schema(_) => ErrorClass::InvariantViolation,
            Self::Source(_) => ErrorClass::Internal,
        }
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        match self {
            Self::FieldNotFound { .. } | Self::Schema(_) => ErrorOrigin::Schema,
            Self::FilterShapeMismatch { .. } | Self::LiteralTypeMismatch { .. } | Self::Filter(_) => {
                ErrorOrigin::Filter
            }
            Self::UnorderableField { .. } => ErrorOrigin::Order,
            Self::DuplicateProjectionField { .. } | Self::EmptyProjection { .. } => {
                ErrorOrigin::Projection
            }
            Self::Source(_) => ErrorOrigin::Source,
        }
    }

    #[must_use]
    pub const fn is_field_not_found(&self) -> bool {
        matches!(self, Self::FieldNotFound { .. })
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {self}", self.origin(), self.class())
    }
}

///
/// SchemaError
///
/// Raised while building a `RecordModel` by hand.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error("type [{type_name}] declares fields [{first}] and [{second}] that differ only by case")]
    DuplicateField {
        type_name: String,
        first: String,
        second: String,
    },
}

///
/// FilterError
///
/// Raised while turning untyped input into a `FilterNode`.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum FilterError {
    #[error("filter input must be an object, got {found}")]
    NotAnObject { found: &'static str },
}

///
/// SourceError
///
/// Failure reported by a data source while executing a composed query.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("data source failure: {message}")]
pub struct SourceError {
    pub message: String,
}

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

///
/// ErrorClass
/// Error taxonomy for classification at API boundaries.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    NotFound,
    Unsupported,
    InvariantViolation,
    Internal,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotFound => "not_found",
            Self::Unsupported => "unsupported",
            Self::InvariantViolation => "invariant_violation",
            Self::Internal => "internal",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Which compiler (or the data source) raised the error.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Schema,
    Filter,
    Order,
    Projection,
    Source,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Schema => "schema",
            Self::Filter => "filter",
            Self::Order => "order",
            Self::Projection => "projection",
            Self::Source => "source",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
