use crate::{
    db::{
        order::OrderSpec,
        predicate::Predicate,
        projection::{FieldProjection, ShapeProjection},
    },
    model::RecordModel,
    traits::FieldValue,
};
use std::fmt;

///
/// PlanProjection
///
/// All        → full source rows
/// Field      → one bare value per row
/// Shape      → reduced-shape rows
///

#[derive(Clone, Debug)]
pub enum PlanProjection {
    All,
    Field(FieldProjection),
    Shape(ShapeProjection),
}

///
/// QueryPlan
///
/// Everything a data source needs to execute a composed query. Every name in
/// it is already resolved against `model`.
///

#[derive(Clone, Debug)]
pub struct QueryPlan {
    pub model: &'static RecordModel,
    pub predicate: Option<Predicate>,
    pub order: OrderSpec,
    pub projection: PlanProjection,
}

impl QueryPlan {
    #[must_use]
    pub(crate) const fn new(model: &'static RecordModel) -> Self {
        Self {
            model,
            predicate: None,
            order: OrderSpec::new(),
            projection: PlanProjection::All,
        }
    }

    /// Row-level filter test; rows always match an unfiltered plan.
    #[must_use]
    pub fn matches<R: FieldValue>(&self, row: &R) -> bool {
        self.predicate.as_ref().is_none_or(|predicate| predicate.eval(row))
    }

    /// One-line, SQL-flavoured rendering for logs and diagnostics.
    #[must_use]
    pub fn explain(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for QueryPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT ")?;
        match &self.projection {
            PlanProjection::All => write!(f, "*")?,
            PlanProjection::Field(projection) => write!(f, "{}", projection.field().name)?,
            PlanProjection::Shape(projection) => {
                let names: Vec<&str> = projection
                    .shape()
                    .fields()
                    .iter()
                    .map(|field| field.name.as_str())
                    .collect();
                write!(f, "{}", names.join(", "))?;
            }
        }
        write!(f, " FROM {}", self.model.name)?;

        if let Some(predicate) = &self.predicate {
            write!(f, " WHERE {predicate}")?;
        }
        if !self.order.is_empty() {
            write!(f, " ORDER BY {}", self.order)?;
        }

        Ok(())
    }
}
