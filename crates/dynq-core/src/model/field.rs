use crate::model::RecordModel;
use std::{
    fmt,
    hash::{Hash, Hasher},
};

///
/// FieldModel
/// Runtime field metadata used by the filter, order and projection compilers.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct FieldModel {
    /// Field name as declared on the record type.
    pub name: String,
    /// Runtime type shape.
    pub kind: FieldKind,
}

impl FieldModel {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

///
/// FieldKind
///
/// Minimal type surface the compilers need.
/// Aligned with `Value` variants; integer and float widths collapse the same
/// way `Value` collapses them.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum FieldKind {
    // Scalar primitives
    Bool,
    Char,
    Decimal,
    Date,
    Float32,
    Float64,
    Int,
    Text,
    Timestamp,
    Uint,
    Ulid,

    // Collections
    List(Box<Self>),

    /// Nested record; the model is resolved lazily so records may refer to
    /// each other without recursive initialization.
    Record(ModelRef),
}

impl FieldKind {
    /// Scalars support equality, membership and ordering.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Self::List(_) | Self::Record(_))
    }

    #[must_use]
    pub const fn is_orderable(&self) -> bool {
        self.is_scalar()
    }

    /// Nested record model, if this is a record field.
    #[must_use]
    pub fn record_model(&self) -> Option<&'static RecordModel> {
        match self {
            Self::Record(model) => Some(model.get()),
            _ => None,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Char => write!(f, "char"),
            Self::Decimal => write!(f, "decimal"),
            Self::Date => write!(f, "date"),
            Self::Float32 => write!(f, "float32"),
            Self::Float64 => write!(f, "float64"),
            Self::Int => write!(f, "int"),
            Self::Text => write!(f, "text"),
            Self::Timestamp => write!(f, "timestamp"),
            Self::Uint => write!(f, "uint"),
            Self::Ulid => write!(f, "ulid"),
            Self::List(inner) => write!(f, "list<{inner}>"),
            Self::Record(model) => write!(f, "{}", model.get().name),
        }
    }
}

///
/// ModelRef
///
/// Deferred handle to a record model. Holds the registry accessor rather than
/// the model itself, so building one model never forces another.
///

#[derive(Clone, Copy)]
pub struct ModelRef(fn() -> &'static RecordModel);

impl ModelRef {
    #[must_use]
    pub const fn new(resolve: fn() -> &'static RecordModel) -> Self {
        Self(resolve)
    }

    #[must_use]
    pub fn get(self) -> &'static RecordModel {
        (self.0)()
    }
}

impl fmt::Debug for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ModelRef").field(&self.get().path).finish()
    }
}

// Identity is the record path; two handles resolving the same type are equal.
impl PartialEq for ModelRef {
    fn eq(&self, other: &Self) -> bool {
        self.get().path == other.get().path
    }
}

impl Eq for ModelRef {}

impl Hash for ModelRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.get().path.hash(state);
    }
}
