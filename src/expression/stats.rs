//! Construction statistics.
//!
//! [`BuildStats`] counts what an [`ExpressionBuilder`](crate::expression::ExpressionBuilder)
//! has produced. The counters are atomics so one instance can be shared (via
//! `Arc`) between builders running on different threads, e.g. one per explored
//! path.

use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing expression construction.
#[derive(Debug, Default)]
pub struct BuildStats {
    /// Successfully built composite expressions.
    operations: AtomicU64,
    /// Composite constructions rejected by validation.
    rejected: AtomicU64,
    /// Leaf requests answered from the interning cache.
    leaf_hits: AtomicU64,
}

impl BuildStats {
    /// Creates zeroed statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_operation(&self) {
        self.operations.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rejection(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_leaf_hit(&self) {
        self.leaf_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of composite expressions built so far.
    #[must_use]
    pub fn operations(&self) -> u64 {
        self.operations.load(Ordering::Relaxed)
    }

    /// Number of composite constructions that failed validation.
    #[must_use]
    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    /// Number of leaves served from the interning cache.
    #[must_use]
    pub fn leaf_hits(&self) -> u64 {
        self.leaf_hits.load(Ordering::Relaxed)
    }

    /// Resets every counter to zero.
    pub fn reset(&self) {
        self.operations.store(0, Ordering::Relaxed);
        self.rejected.store(0, Ordering::Relaxed);
        self.leaf_hits.store(0, Ordering::Relaxed);
    }
}
