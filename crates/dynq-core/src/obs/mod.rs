//! Observability: runtime telemetry (metrics) and sink abstractions.
//!
//! Counters are thread-local; nothing here reaches into compiled queries.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventReport, EventState, RecordCounters, RecordSummary};
pub use sink::{
    CompileKind, MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink,
};
