//! Process-wide cache of synthesized projection shapes.

use crate::model::{FieldModel, RecordModel};
use derive_more::Deref;
use std::{
    cell::Cell,
    collections::{HashMap, hash_map::Entry},
    sync::{
        Arc, OnceLock, PoisonError, RwLock,
        atomic::{AtomicUsize, Ordering},
    },
};

///
/// ShapeSignature
///
/// Ordered (name, kind) pairs. Two requests with the same signature share
/// one shape regardless of which record they came from.
///

#[derive(Clone, Debug, Deref, Eq, Hash, PartialEq)]
pub struct ShapeSignature(Vec<FieldModel>);

impl ShapeSignature {
    #[must_use]
    pub const fn new(fields: Vec<FieldModel>) -> Self {
        Self(fields)
    }

    fn synthesize(&self) -> RecordModel {
        let names: Vec<&str> = self.0.iter().map(|field| field.name.as_str()).collect();
        let name = format!("Projection({})", names.join(", "));

        // names were deduplicated by slot, so they cannot collide
        RecordModel::from_validated(name.clone(), name, self.0.clone())
    }
}

static CACHE: OnceLock<RwLock<HashMap<ShapeSignature, Arc<RecordModel>>>> = OnceLock::new();
static HITS: AtomicUsize = AtomicUsize::new(0);
static MISSES: AtomicUsize = AtomicUsize::new(0);

const DEFAULT_CACHE_DISABLED: bool = !cfg!(feature = "shape-cache");

// Thread-local so tests can toggle caching without affecting other threads.
thread_local! {
    static CACHE_DISABLED: Cell<bool> = const { Cell::new(DEFAULT_CACHE_DISABLED) };
}

///
/// CacheStats
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub size: usize,
}

/// Shape for `signature`, synthesized on first request.
///
/// Insert-if-absent: concurrent misses may each synthesize, but only the
/// first published shape is ever returned. The flag is `true` on a hit.
pub(crate) fn shape_for(signature: ShapeSignature) -> (Arc<RecordModel>, bool) {
    if cache_disabled() {
        return (Arc::new(signature.synthesize()), false);
    }

    let cache = CACHE.get_or_init(|| RwLock::new(HashMap::new()));

    let cached = cache
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&signature)
        .cloned();
    if let Some(shape) = cached {
        HITS.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(shape = %shape.name, "shape cache hit");
        return (shape, true);
    }

    let built = Arc::new(signature.synthesize());
    let mut guard = cache.write().unwrap_or_else(PoisonError::into_inner);
    match guard.entry(signature) {
        // lost the race; the other thread's shape stands
        Entry::Occupied(entry) => {
            HITS.fetch_add(1, Ordering::Relaxed);
            (Arc::clone(entry.get()), true)
        }
        Entry::Vacant(entry) => {
            MISSES.fetch_add(1, Ordering::Relaxed);
            (Arc::clone(entry.insert(built)), false)
        }
    }
}

// Cache statistics are best-effort only.
#[must_use]
pub fn shape_cache_stats() -> CacheStats {
    let size = CACHE.get().map_or(0, |cache| {
        cache.read().unwrap_or_else(PoisonError::into_inner).len()
    });

    CacheStats {
        hits: HITS.load(Ordering::Relaxed),
        misses: MISSES.load(Ordering::Relaxed),
        size,
    }
}

/// Run `f` with the shape cache bypassed on the current thread.
pub fn with_shape_cache_disabled<R>(f: impl FnOnce() -> R) -> R {
    with_cache_disabled(true, f)
}

/// Run `f` with the shape cache in use on the current thread.
pub fn with_shape_cache_enabled<R>(f: impl FnOnce() -> R) -> R {
    with_cache_disabled(false, f)
}

// The previous flag is restored on every exit, including unwinding out of `f`.
fn with_cache_disabled<R>(disabled: bool, f: impl FnOnce() -> R) -> R {
    struct Restore(bool);

    impl Drop for Restore {
        fn drop(&mut self) {
            CACHE_DISABLED.with(|flag| flag.set(self.0));
        }
    }

    let _restore = Restore(CACHE_DISABLED.with(|flag| flag.replace(disabled)));

    f()
}

pub(super) fn cache_disabled() -> bool {
    CACHE_DISABLED.with(Cell::get)
}
