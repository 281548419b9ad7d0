//! Lookup metrics for a manager.
//!
//! Counts how translation requests were satisfied: directly, through the
//! fallback language, or not at all (key echoed back).

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Lookup counters owned by one manager.
#[derive(Debug, Default)]
pub struct LookupMetrics {
    /// Messages found in the requested language
    hits: AtomicUsize,

    /// Messages found only in the fallback language
    fallback_hits: AtomicUsize,

    /// Lookups that fell back to returning the key
    misses: AtomicUsize,
}

impl LookupMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message found in the requested language.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a message found only in the fallback language.
    pub fn record_fallback_hit(&self) {
        self.fallback_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup that returned the key.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn fallback_hits(&self) -> usize {
        self.fallback_hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.hits();
        let fallback_hits = self.fallback_hits();
        let misses = self.misses();
        let total = hits + fallback_hits + misses;

        let hit_rate = if total > 0 {
            ((hits + fallback_hits) as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            lookups: total,
            hits,
            fallback_hits,
            misses,
            hit_rate,
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.fallback_hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

/// Snapshot of lookup statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    /// Total translate calls counted
    pub lookups: usize,

    pub hits: usize,

    pub fallback_hits: usize,

    pub misses: usize,

    /// Share of lookups that produced a message, as a percentage (0-100)
    pub hit_rate: f64,
}
