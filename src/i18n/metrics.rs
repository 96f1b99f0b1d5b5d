//! Locale diagnostics: validation cache usage, loader failures and
//! degraded formatting.
//!
//! Degraded formatting is silent to callers, so these counters (plus the
//! `debug!` lines at the fallback sites) are the only place it shows up.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

pub struct I18nMetrics {
    /// Validation results served from the cache
    cache_hits: AtomicUsize,

    /// Validation results that had to be computed
    cache_misses: AtomicUsize,

    /// Translation maps the loader failed to produce
    load_failures: AtomicUsize,

    /// Formatting calls that took the manual fallback path
    formatting_fallbacks: AtomicUsize,
}

static METRICS: OnceLock<I18nMetrics> = OnceLock::new();

impl I18nMetrics {
    pub fn new() -> Self {
        Self {
            cache_hits: AtomicUsize::new(0),
            cache_misses: AtomicUsize::new(0),
            load_failures: AtomicUsize::new(0),
            formatting_fallbacks: AtomicUsize::new(0),
        }
    }

    /// Get the process-wide metrics instance.
    pub fn global() -> &'static I18nMetrics {
        METRICS.get_or_init(I18nMetrics::new)
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_load_failure(&self) {
        self.load_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_formatting_fallback(&self) {
        self.formatting_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cache_hits(&self) -> usize {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn cache_misses(&self) -> usize {
        self.cache_misses.load(Ordering::Relaxed)
    }

    pub fn load_failures(&self) -> usize {
        self.load_failures.load(Ordering::Relaxed)
    }

    pub fn formatting_fallbacks(&self) -> usize {
        self.formatting_fallbacks.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.cache_hits();
        let misses = self.cache_misses();
        let total_cache_queries = hits + misses;
        let cache_hit_rate = if total_cache_queries > 0 {
            (hits as f64 / total_cache_queries as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            cache_hits: hits,
            cache_misses: misses,
            cache_hit_rate,
            load_failures: self.load_failures(),
            formatting_fallbacks: self.formatting_fallbacks(),
        }
    }
}

impl Default for I18nMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of the locale diagnostics counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub cache_hits: usize,
    pub cache_misses: usize,

    /// Cache hit rate as a percentage (0-100)
    pub cache_hit_rate: f64,

    pub load_failures: usize,
    pub formatting_fallbacks: usize,
}
