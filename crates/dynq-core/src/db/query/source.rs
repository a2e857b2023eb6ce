//! Module: query::source
//! Responsibility: the execution seam a composed query is handed to.
//! Does not own: compilation; every plan arrives fully resolved.

use crate::{
    db::{
        projection::{FieldProjection, ProjectedRow, ShapeProjection},
        query::QueryPlan,
    },
    error::SourceError,
    obs::sink::{MetricsEvent, record},
    traits::Record,
    value::Value,
};
use derive_more::IntoIterator;

///
/// DataSource
///
/// External query-execution collaborator. `fetch` must honour the plan's
/// predicate (conjunction) and ordering (stable tie-breaks); the projection
/// variants default to mapping full rows and may be overridden to push the
/// projection down.
///

pub trait DataSource<R: Record> {
    fn fetch(&self, plan: &QueryPlan) -> Result<Vec<R>, SourceError>;

    fn fetch_values(
        &self,
        plan: &QueryPlan,
        projection: &FieldProjection,
    ) -> Result<Vec<Value>, SourceError> {
        let rows = self.fetch(plan)?;

        Ok(rows.iter().map(|row| projection.apply(row)).collect())
    }

    fn fetch_rows(
        &self,
        plan: &QueryPlan,
        projection: &ShapeProjection,
    ) -> Result<Vec<ProjectedRow>, SourceError> {
        let rows = self.fetch(plan)?;

        Ok(rows.iter().map(|row| projection.apply(row)).collect())
    }
}

impl<R: Record, D: DataSource<R> + ?Sized> DataSource<R> for &D {
    fn fetch(&self, plan: &QueryPlan) -> Result<Vec<R>, SourceError> {
        (**self).fetch(plan)
    }
}

///
/// MemorySource
///
/// In-memory collaborator: evaluates the predicate row by row and applies a
/// stable composite sort. The reference for how a data source must behave.
///

#[derive(Clone, Debug, IntoIterator)]
#[into_iterator(owned, ref)]
pub struct MemorySource<R> {
    rows: Vec<R>,
}

impl<R> MemorySource<R> {
    #[must_use]
    pub const fn new(rows: Vec<R>) -> Self {
        Self { rows }
    }

    pub fn push(&mut self, row: R) {
        self.rows.push(row);
    }

    #[must_use]
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<R> Default for MemorySource<R> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<R> FromIterator<R> for MemorySource<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<R: Record + Clone> DataSource<R> for MemorySource<R> {
    fn fetch(&self, plan: &QueryPlan) -> Result<Vec<R>, SourceError> {
        let matched: Vec<R> = self
            .rows
            .iter()
            .filter(|row| plan.matches(*row))
            .cloned()
            .collect();

        record(MetricsEvent::RowsScanned {
            record_path: R::PATH,
            rows_scanned: u64::try_from(self.rows.len()).unwrap_or(u64::MAX),
        });

        Ok(plan.order.sort(matched))
    }
}
