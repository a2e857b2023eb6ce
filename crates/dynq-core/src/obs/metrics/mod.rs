use serde::{Deserialize, Serialize};
use std::{
    cell::RefCell,
    collections::BTreeMap,
    time::{SystemTime, UNIX_EPOCH},
};

///
/// EventState
/// Ephemeral, in-memory counters for query composition and execution.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub records: BTreeMap<String, RecordCounters>,
    pub since_ms: u64,
}

impl Default for EventState {
    fn default() -> Self {
        Self {
            ops: EventOps::default(),
            records: BTreeMap::new(),
            since_ms: now_millis(),
        }
    }
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventOps {
    // Compilers
    pub filter_compiles: u64,
    pub order_compiles: u64,
    pub projection_compiles: u64,

    // Schema / shapes
    pub schemas_built: u64,
    pub shape_cache_hits: u64,
    pub shape_cache_misses: u64,

    // Execution
    pub load_calls: u64,
    pub rows_scanned: u64,
    pub rows_returned: u64,
}

///
/// RecordCounters
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RecordCounters {
    pub compiles: u64,
    pub load_calls: u64,
    pub rows_scanned: u64,
    pub rows_returned: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters (useful in tests).
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

///
/// EventReport
/// Counter report for the current thread.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    /// Ephemeral runtime counters since `since_ms`.
    pub counters: Option<EventState>,
    /// Per-record counters and averages.
    pub record_counters: Vec<RecordSummary>,
}

///
/// RecordSummary
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RecordSummary {
    pub path: String,
    pub compiles: u64,
    pub load_calls: u64,
    pub rows_scanned: u64,
    pub rows_returned: u64,
    pub avg_rows_per_load: f64,
    pub avg_rows_scanned_per_load: f64,
}

/// Build a metrics report from the in-memory counters.
///
/// `window_start_ms` drops the report when the counters were reset before
/// the requested window start.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn report_window_start(window_start_ms: Option<u64>) -> EventReport {
    let snap = with_state(Clone::clone);
    if let Some(requested) = window_start_ms
        && requested > snap.since_ms
    {
        return EventReport::default();
    }

    let mut record_counters: Vec<RecordSummary> = snap
        .records
        .iter()
        .map(|(path, ops)| {
            let per_load = |rows: u64| {
                if ops.load_calls > 0 {
                    rows as f64 / ops.load_calls as f64
                } else {
                    0.0
                }
            };

            RecordSummary {
                path: path.clone(),
                compiles: ops.compiles,
                load_calls: ops.load_calls,
                rows_scanned: ops.rows_scanned,
                rows_returned: ops.rows_returned,
                avg_rows_per_load: per_load(ops.rows_returned),
                avg_rows_scanned_per_load: per_load(ops.rows_scanned),
            }
        })
        .collect();

    // busiest records first, path breaks ties
    record_counters.sort_by(|a, b| {
        b.rows_scanned
            .cmp(&a.rows_scanned)
            .then_with(|| a.path.cmp(&b.path))
    });

    EventReport {
        counters: Some(snap),
        record_counters,
    }
}
