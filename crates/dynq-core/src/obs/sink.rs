//! Metrics sink boundary.
//!
//! Compilers and the query facade MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
//!
//! This module is the only allowed bridge between composition logic
//! and the metrics state.
use crate::obs::metrics;
use std::cell::RefCell;

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<*const dyn MetricsSink>> = RefCell::new(None);
}

///
/// CompileKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompileKind {
    Filter,
    Order,
    Projection,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    Compile {
        kind: CompileKind,
        record_path: &'static str,
    },
    SchemaBuilt {
        record_path: &'static str,
    },
    ShapeCache {
        hit: bool,
    },
    LoadStart {
        record_path: &'static str,
    },
    RowsScanned {
        record_path: &'static str,
        rows_scanned: u64,
    },
    RowsReturned {
        record_path: &'static str,
        rows_returned: u64,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::Compile { kind, record_path } => {
                metrics::with_state_mut(|m| {
                    match kind {
                        CompileKind::Filter => {
                            m.ops.filter_compiles = m.ops.filter_compiles.saturating_add(1);
                        }
                        CompileKind::Order => {
                            m.ops.order_compiles = m.ops.order_compiles.saturating_add(1);
                        }
                        CompileKind::Projection => {
                            m.ops.projection_compiles =
                                m.ops.projection_compiles.saturating_add(1);
                        }
                    }

                    let entry = m.records.entry(record_path.to_string()).or_default();
                    entry.compiles = entry.compiles.saturating_add(1);
                });
            }

            MetricsEvent::SchemaBuilt { .. } => {
                metrics::with_state_mut(|m| {
                    m.ops.schemas_built = m.ops.schemas_built.saturating_add(1);
                });
            }

            MetricsEvent::ShapeCache { hit } => {
                metrics::with_state_mut(|m| {
                    if hit {
                        m.ops.shape_cache_hits = m.ops.shape_cache_hits.saturating_add(1);
                    } else {
                        m.ops.shape_cache_misses = m.ops.shape_cache_misses.saturating_add(1);
                    }
                });
            }

            MetricsEvent::LoadStart { record_path } => {
                metrics::with_state_mut(|m| {
                    m.ops.load_calls = m.ops.load_calls.saturating_add(1);
                    let entry = m.records.entry(record_path.to_string()).or_default();
                    entry.load_calls = entry.load_calls.saturating_add(1);
                });
            }

            MetricsEvent::RowsScanned {
                record_path,
                rows_scanned,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.rows_scanned = m.ops.rows_scanned.saturating_add(rows_scanned);
                    let entry = m.records.entry(record_path.to_string()).or_default();
                    entry.rows_scanned = entry.rows_scanned.saturating_add(rows_scanned);
                });
            }

            MetricsEvent::RowsReturned {
                record_path,
                rows_returned,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.rows_returned = m.ops.rows_returned.saturating_add(rows_returned);
                    let entry = m.records.entry(record_path.to_string()).or_default();
                    entry.rows_returned = entry.rows_returned.saturating_add(rows_returned);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_ptr = SINK_OVERRIDE.with(|cell| *cell.borrow());
    if let Some(ptr) = override_ptr {
        // SAFETY:
        // Preconditions:
        // - `ptr` was produced from a valid `&dyn MetricsSink` in `with_metrics_sink`.
        // - `with_metrics_sink` always restores the previous pointer before returning,
        //   including unwind paths via `Guard::drop`.
        // - `record` is synchronous and never stores `ptr` beyond this call.
        //
        // Aliasing:
        // - Only a shared reference is materialized, matching the shared borrow
        //   used to install the override.
        unsafe { (&*ptr).record(event) };
    } else {
        GLOBAL_METRICS_SINK.record(event);
    }
}

/// Snapshot the current thread's metrics state.
///
/// `window_start_ms` filters by window start (`EventState::since_ms`),
/// not by per-event timestamps.
#[must_use]
pub fn metrics_report(window_start_ms: Option<u64>) -> metrics::EventReport {
    metrics::report_window_start(window_start_ms)
}

/// Reset all metrics state for the current thread.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
///
/// Events recorded on this thread while `f` runs go to `sink` instead of the
/// built-in counters.
pub fn with_metrics_sink<T>(sink: &dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<*const dyn MetricsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0;
            });
        }
    }

    // SAFETY:
    // - `sink_ptr` is installed only for this dynamic scope.
    // - `Guard` always restores the previous slot on all exits, including panic.
    // - `record` only dereferences synchronously and never persists `sink_ptr`.
    let sink_ptr = unsafe { std::mem::transmute::<&dyn MetricsSink, *const dyn MetricsSink>(sink) };
    let prev = SINK_OVERRIDE.with(|cell| {
        let mut slot = cell.borrow_mut();
        slot.replace(sink_ptr)
    });
    let _guard = Guard(prev);

    f()
}

///
/// TESTS
///
