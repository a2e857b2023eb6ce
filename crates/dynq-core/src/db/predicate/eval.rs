use crate::{
    db::predicate::{CompareOp, ComparePredicate, Predicate},
    traits::FieldValue,
    value::Value,
};

impl Predicate {
    /// Evaluate against one row.
    ///
    /// A path that steps through an absent optional record reads as `Null`.
    #[must_use]
    pub fn eval<R: FieldValue>(&self, row: &R) -> bool {
        match self {
            Self::True => true,
            Self::Compare(cmp) => cmp.eval(row),
            Self::And(children) => children.iter().all(|child| child.eval(row)),
        }
    }
}

impl ComparePredicate {
    #[must_use]
    pub fn eval<R: FieldValue>(&self, row: &R) -> bool {
        let actual = row.value_at(self.path.slots()).unwrap_or(Value::Null);

        self.matches(&actual)
    }

    /// Test an already-extracted field value.
    #[must_use]
    pub fn matches(&self, actual: &Value) -> bool {
        match (self.op, &self.value) {
            (CompareOp::Eq, expected) => actual.strict_eq(expected),
            (CompareOp::In, Value::List(candidates)) => {
                candidates.iter().any(|candidate| actual.strict_eq(candidate))
            }
            (CompareOp::In, _) => false,
        }
    }
}
