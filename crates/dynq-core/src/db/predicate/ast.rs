use crate::value::Value;
use std::{fmt, ops::BitAnd};

///
/// FieldPath
///
/// Route from a record to one of its (possibly nested) fields: resolved
/// slots for evaluation, canonical names for display.
///

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct FieldPath {
    slots: Vec<usize>,
    names: Vec<String>,
}

impl FieldPath {
    #[must_use]
    pub const fn root() -> Self {
        Self {
            slots: Vec::new(),
            names: Vec::new(),
        }
    }

    /// Extend the path by one field.
    #[must_use]
    pub fn child(&self, slot: usize, name: &str) -> Self {
        let mut next = self.clone();
        next.slots.push(slot);
        next.names.push(name.to_string());
        next
    }

    #[must_use]
    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub const fn depth(&self) -> usize {
        self.slots.len()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names.join("."))
    }
}

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompareOp {
    /// field == value
    Eq,
    /// field ∈ value (a `Value::List`)
    In,
}

///
/// ComparePredicate
///

#[derive(Clone, Debug, PartialEq)]
pub struct ComparePredicate {
    pub path: FieldPath,
    pub op: CompareOp,
    pub value: Value,
}

impl ComparePredicate {
    #[must_use]
    pub const fn eq(path: FieldPath, value: Value) -> Self {
        Self {
            path,
            op: CompareOp::Eq,
            value,
        }
    }

    #[must_use]
    pub const fn in_(path: FieldPath, values: Vec<Value>) -> Self {
        Self {
            path,
            op: CompareOp::In,
            value: Value::List(values),
        }
    }
}

///
/// Predicate
///
/// True        → matches every row (no constraint)
/// Compare     → equality or membership on one field
/// And         → every child must hold
///

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    True,
    Compare(ComparePredicate),
    And(Vec<Self>),
}

impl Predicate {
    /// Conjunction of `preds`, flattened.
    ///
    /// Nested conjunctions are spliced in place and `True` children dropped;
    /// an empty input is `True` and a single child is returned bare.
    #[must_use]
    pub fn and(preds: Vec<Self>) -> Self {
        let mut flat = Vec::with_capacity(preds.len());
        for pred in preds {
            match pred {
                Self::True => {}
                Self::And(children) => flat.extend(children),
                other => flat.push(other),
            }
        }

        match flat.len() {
            0 => Self::True,
            1 => flat.pop().unwrap_or(Self::True),
            _ => Self::And(flat),
        }
    }

    #[must_use]
    pub const fn eq(path: FieldPath, value: Value) -> Self {
        Self::Compare(ComparePredicate::eq(path, value))
    }

    #[must_use]
    pub const fn in_(path: FieldPath, values: Vec<Value>) -> Self {
        Self::Compare(ComparePredicate::in_(path, values))
    }

    #[must_use]
    pub const fn is_true(&self) -> bool {
        matches!(self, Self::True)
    }

    /// Number of field comparisons in this predicate.
    #[must_use]
    pub fn compare_count(&self) -> usize {
        match self {
            Self::True => 0,
            Self::Compare(_) => 1,
            Self::And(children) => children.iter().map(Self::compare_count).sum(),
        }
    }
}

impl BitAnd for Predicate {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::and(vec![self, rhs])
    }
}

impl BitAnd for &Predicate {
    type Output = Predicate;

    fn bitand(self, rhs: Self) -> Self::Output {
        Predicate::and(vec![self.clone(), rhs.clone()])
    }
}

impl fmt::Display for ComparePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op {
            CompareOp::Eq => write!(f, "{} = {}", self.path, self.value),
            CompareOp::In => write!(f, "{} IN {}", self.path, self.value),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::True => write!(f, "TRUE"),
            Self::Compare(cmp) => write!(f, "{cmp}"),
            Self::And(children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " AND ")?;
                    }
                    match child {
                        Self::And(_) => write!(f, "({child})")?,
                        _ => write!(f, "{child}")?,
                    }
                }
                Ok(())
            }
        }
    }
}
