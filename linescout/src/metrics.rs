use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;

/// Tracks per-search progress counters across worker tasks.
///
/// An empty result stream is indistinguishable from one where every file
/// failed to read; these counters are the optional side channel that lets a
/// caller tell the two apart without changing the stream's contract.
#[derive(Debug, Clone)]
pub struct SearchMetrics {
    files_scanned: Arc<AtomicU64>,
    files_failed: Arc<AtomicU64>,
    occurrences_emitted: Arc<AtomicU64>,
}

impl SearchMetrics {
    /// Creates a new SearchMetrics instance with all counters at zero
    pub fn new() -> Self {
        Self {
            files_scanned: Arc::new(AtomicU64::new(0)),
            files_failed: Arc::new(AtomicU64::new(0)),
            occurrences_emitted: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Records one fully scanned file and the occurrences it produced
    pub fn record_scanned(&self, occurrences: u64) {
        self.files_scanned.fetch_add(1, Ordering::Relaxed);
        self.occurrences_emitted
            .fetch_add(occurrences, Ordering::Relaxed);
    }

    /// Records one file whose scan failed and produced nothing
    pub fn record_failure(&self) {
        self.files_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Gets a point-in-time copy of all counters
    pub fn snapshot(&self) -> SearchStats {
        SearchStats {
            files_scanned: self.files_scanned.load(Ordering::Relaxed),
            files_failed: self.files_failed.load(Ordering::Relaxed),
            occurrences_emitted: self.occurrences_emitted.load(Ordering::Relaxed),
        }
    }

    /// Logs the current counters
    pub fn log_stats(&self) {
        let stats = self.snapshot();
        info!(
            "Search stats: {} files scanned, {} files failed, {} occurrences emitted",
            stats.files_scanned, stats.files_failed, stats.occurrences_emitted
        );
    }
}

impl Default for SearchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time counter values for one search
#[derive(Debug, Clone, Copy)]
pub struct SearchStats {
    pub files_scanned: u64,
    pub files_failed: u64,
    pub occurrences_emitted: u64,
}
