//! Module: query
//! Responsibility: the public builder chain wiring the filter, sort and
//! projection compilers to a data source.
//! Does not own: compilation rules or row evaluation.
//! Boundary: every builder step compiles eagerly, so a query that builds is a
//! query that can run.

mod plan;
mod source;


pub use plan::{PlanProjection, QueryPlan};
pub use source::{DataSource, MemorySource};

use crate::{
    db::{
        Direction,
        order::{self, OrderSpec},
        predicate::{Predicate, compile_filter},
        projection::{self, FieldProjection, ProjectedRow, ShapeProjection},
    },
    error::QueryError,
    filter::FilterNode,
    obs::sink::{CompileKind, MetricsEvent, record},
    traits::{Filter, Record},
    value::Value,
};
use std::{fmt, marker::PhantomData};

///
/// Unordered
/// Typestate: no ordering keys yet; `then_by` is unavailable.
///

#[derive(Clone, Copy, Debug)]
pub struct Unordered;

///
/// Ordered
/// Typestate: a primary order exists; `then_by` appends tie-breaks.
///

#[derive(Clone, Copy, Debug)]
pub struct Ordered;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Unordered {}
    impl Sealed for super::Ordered {}
}

/// Ordering typestate of a `Query`.
pub trait OrderState: sealed::Sealed {}
impl OrderState for Unordered {}
impl OrderState for Ordered {}

///
/// Query
///
/// Immutable builder over record type `R`. Each step consumes the query and
/// returns a new one with one more clause attached; clauses compile at the
/// step that adds them.
///

pub struct Query<R: Record, S: OrderState = Unordered> {
    predicate: Option<Predicate>,
    order: OrderSpec,
    _marker: PhantomData<fn() -> (R, S)>,
}

impl<R: Record> Query<R, Unordered> {
    /// Unfiltered, unordered query over every row of the source.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            predicate: None,
            order: OrderSpec::new(),
            _marker: PhantomData,
        }
    }
}

impl<R: Record> Default for Query<R, Unordered> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record, S: OrderState> Clone for Query<R, S> {
    fn clone(&self) -> Self {
        Self {
            predicate: self.predicate.clone(),
            order: self.order.clone(),
            _marker: PhantomData,
        }
    }
}

impl<R: Record, S: OrderState> fmt::Debug for Query<R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("record", &R::PATH)
            .field("predicate", &self.predicate)
            .field("order", &self.order)
            .finish()
    }
}

impl<R: Record, S: OrderState> Query<R, S> {
    // ------------------------------------------------------------------
    // Filtering
    // ------------------------------------------------------------------

    /// AND the constraints of a filter object into this query.
    ///
    /// A filter that constrains nothing leaves the query untouched.
    pub fn filter_by<F: Filter + ?Sized>(self, filter: &F) -> Result<Self, QueryError> {
        self.filter_node(&filter.to_filter_node())
    }

    /// AND the constraints of a filter graph into this query.
    pub fn filter_node(mut self, node: &FilterNode) -> Result<Self, QueryError> {
        let compiled = compile_filter(R::model(), node)?;
        compile_event_for::<R>(CompileKind::Filter);

        if let Some(compiled) = compiled {
            self.predicate = Some(match self.predicate.take() {
                Some(existing) => existing & compiled,
                None => compiled,
            });
        }

        Ok(self)
    }

    /// AND the constraints of an untyped JSON filter object into this query.
    #[cfg(feature = "json")]
    pub fn filter_json(self, json: &serde_json::Value) -> Result<Self, QueryError> {
        let node = FilterNode::from_json(json)?;

        self.filter_node(&node)
    }

    // ------------------------------------------------------------------
    // Ordering
    // ------------------------------------------------------------------

    /// Order ascending by `field`, replacing any existing order.
    pub fn order_by(self, field: &str) -> Result<Query<R, Ordered>, QueryError> {
        self.order_by_dir(field, Direction::Asc)
    }

    /// Order descending by `field`, replacing any existing order.
    pub fn order_by_desc(self, field: &str) -> Result<Query<R, Ordered>, QueryError> {
        self.order_by_dir(field, Direction::Desc)
    }

    pub fn order_by_dir(
        self,
        field: &str,
        direction: Direction,
    ) -> Result<Query<R, Ordered>, QueryError> {
        let order = order::primary(R::model(), field, direction)?;
        compile_event_for::<R>(CompileKind::Order);

        Ok(Query {
            predicate: self.predicate,
            order,
            _marker: PhantomData,
        })
    }

    // ------------------------------------------------------------------
    // Projection
    // ------------------------------------------------------------------

    /// Project onto one field; rows become bare values.
    pub fn select(self, field: &str) -> Result<FieldQuery<R>, QueryError> {
        let projection = projection::project_single(R::model(), field)?;
        compile_event_for::<R>(CompileKind::Projection);

        Ok(FieldQuery {
            plan: self.into_plan(),
            projection,
            _marker: PhantomData,
        })
    }

    /// Project onto several fields; rows take a reduced shape.
    pub fn select_many<F: AsRef<str>>(self, fields: &[F]) -> Result<ShapeQuery<R>, QueryError> {
        let projection = projection::project_many(R::model(), fields)?;
        compile_event_for::<R>(CompileKind::Projection);

        Ok(ShapeQuery {
            plan: self.into_plan(),
            projection,
            _marker: PhantomData,
        })
    }

    // ------------------------------------------------------------------
    // Inspection / execution
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    #[must_use]
    pub const fn order(&self) -> &OrderSpec {
        &self.order
    }

    #[must_use]
    pub fn plan(&self) -> QueryPlan {
        self.clone().into_plan()
    }

    #[must_use]
    pub fn explain(&self) -> String {
        self.plan().explain()
    }

    /// Execute against `source`, returning full rows.
    pub fn load<D>(&self, source: &D) -> Result<Vec<R>, QueryError>
    where
        D: DataSource<R> + ?Sized,
    {
        let plan = self.plan();
        load_start::<R>(&plan);

        let rows = source.fetch(&plan)?;
        rows_returned::<R>(rows.len());

        Ok(rows)
    }

    fn into_plan(self) -> QueryPlan {
        let mut plan = QueryPlan::new(R::model());
        plan.predicate = self.predicate;
        plan.order = self.order;
        plan
    }
}

impl<R: Record> Query<R, Ordered> {
    /// Ascending tie-break after every existing key.
    pub fn then_by(self, field: &str) -> Result<Self, QueryError> {
        self.then_by_dir(field, Direction::Asc)
    }

    /// Descending tie-break after every existing key.
    pub fn then_by_desc(self, field: &str) -> Result<Self, QueryError> {
        self.then_by_dir(field, Direction::Desc)
    }

    pub fn then_by_dir(mut self, field: &str, direction: Direction) -> Result<Self, QueryError> {
        self.order = order::secondary(self.order, R::model(), field, direction)?;
        compile_event_for::<R>(CompileKind::Order);

        Ok(self)
    }
}

///
/// FieldQuery
/// A query projected onto one field.
///

pub struct FieldQuery<R: Record> {
    plan: QueryPlan,
    projection: FieldProjection,
    _marker: PhantomData<fn() -> R>,
}

impl<R: Record> FieldQuery<R> {
    #[must_use]
    pub const fn projection(&self) -> &FieldProjection {
        &self.projection
    }

    #[must_use]
    pub fn plan(&self) -> QueryPlan {
        let mut plan = self.plan.clone();
        plan.projection = PlanProjection::Field(self.projection.clone());
        plan
    }

    #[must_use]
    pub fn explain(&self) -> String {
        self.plan().explain()
    }

    /// Execute, returning one bare value per matching row.
    pub fn load<D>(&self, source: &D) -> Result<Vec<Value>, QueryError>
    where
        D: DataSource<R> + ?Sized,
    {
        let plan = self.plan();
        load_start::<R>(&plan);

        let values = source.fetch_values(&plan, &self.projection)?;
        rows_returned::<R>(values.len());

        Ok(values)
    }
}

///
/// ShapeQuery
/// A query projected onto a reduced record shape.
///

pub struct ShapeQuery<R: Record> {
    plan: QueryPlan,
    projection: ShapeProjection,
    _marker: PhantomData<fn() -> R>,
}

impl<R: Record> ShapeQuery<R> {
    #[must_use]
    pub const fn projection(&self) -> &ShapeProjection {
        &self.projection
    }

    #[must_use]
    pub fn plan(&self) -> QueryPlan {
        let mut plan = self.plan.clone();
        plan.projection = PlanProjection::Shape(self.projection.clone());
        plan
    }

    #[must_use]
    pub fn explain(&self) -> String {
        self.plan().explain()
    }

    /// Execute, returning one reduced-shape row per matching row.
    pub fn load<D>(&self, source: &D) -> Result<Vec<ProjectedRow>, QueryError>
    where
        D: DataSource<R> + ?Sized,
    {
        let plan = self.plan();
        load_start::<R>(&plan);

        let rows = source.fetch_rows(&plan, &self.projection)?;
        rows_returned::<R>(rows.len());

        Ok(rows)
    }
}

// ----------------------------------------------------------------------
// Instrumentation
// ----------------------------------------------------------------------

fn compile_event_for<R: Record>(kind: CompileKind) {
    record(MetricsEvent::Compile {
        kind,
        record_path: R::PATH,
    });
}

fn load_start<R: Record>(plan: &QueryPlan) {
    tracing::debug!(record = R::PATH, plan = %plan, "executing query");
    record(MetricsEvent::LoadStart {
        record_path: R::PATH,
    });
}

fn rows_returned<R: Record>(rows: usize) {
    tracing::debug!(record = R::PATH, rows, "query returned");
    record(MetricsEvent::RowsReturned {
        record_path: R::PATH,
        rows_returned: u64::try_from(rows).unwrap_or(u64::MAX),
    });
}
