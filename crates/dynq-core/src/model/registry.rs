//! Process-wide schema registry keyed by type identity.
//!
//! Models are derived lazily on first use, leaked to `'static`, and never
//! invalidated: record types are fixed for the lifetime of the process.

use crate::{
    model::RecordModel,
    obs::sink::{MetricsEvent, record},
    traits::Record,
};
use std::{
    any::TypeId,
    collections::{HashMap, hash_map::Entry},
    sync::{OnceLock, PoisonError, RwLock},
};

static REGISTRY: OnceLock<RwLock<HashMap<TypeId, &'static RecordModel>>> = OnceLock::new();

/// Return the registered model for `R`, building it on first use.
///
/// Insert-if-absent: when two threads race on the same type, both may build a
/// model but only the first one is published; readers only ever see a fully
/// built model.
#[must_use]
pub fn schema_of<R: Record>() -> &'static RecordModel {
    let registry = REGISTRY.get_or_init(|| RwLock::new(HashMap::new()));
    let key = TypeId::of::<R>();

    let cached = registry
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
        .copied();
    if let Some(model) = cached {
        return model;
    }

    // Build outside the lock; describe() never touches the registry.
    let built = Box::new(R::describe());

    let mut guard = registry.write().unwrap_or_else(PoisonError::into_inner);
    match guard.entry(key) {
        Entry::Occupied(entry) => *entry.get(),
        Entry::Vacant(entry) => {
            let model: &'static RecordModel = Box::leak(built);
            tracing::debug!(
                record = %model.path,
                fields = model.len(),
                "registered record schema"
            );
            record(MetricsEvent::SchemaBuilt {
                record_path: R::PATH,
            });

            *entry.insert(model)
        }
    }
}

/// Number of record types registered so far.
#[must_use]
pub fn registered_count() -> usize {
    REGISTRY.get().map_or(0, |registry| {
        registry.read().unwrap_or_else(PoisonError::into_inner).len()
    })
}
