//! Statistics for search runs.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters shared by the paginator and all workers of a search run.
#[derive(Debug, Default)]
pub struct SearchStats {
    started_at: Option<DateTime<Utc>>,

    pages_listed: AtomicU64,
    objects_listed: AtomicU64,
    objects_fetched: AtomicU64,
    objects_matched: AtomicU64,
    bytes_fetched: AtomicU64,
    bytes_written: AtomicU64,

    /// Decode warnings for matched objects, keyed by object
    warnings: Mutex<Vec<String>>,
}

impl SearchStats {
    /// Create a new stats tracker with the current time as start time.
    pub fn new() -> Self {
        Self {
            started_at: Some(Utc::now()),
            ..Default::default()
        }
    }

    /// Record a listing call; returns the zero-based page number.
    pub fn record_page(&self) -> u64 {
        self.pages_listed.fetch_add(1, Ordering::Relaxed)
    }

    pub fn record_listed(&self) {
        self.objects_listed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetched(&self, bytes: u64) {
        self.objects_fetched.fetch_add(1, Ordering::Relaxed);
        self.bytes_fetched.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn record_matched(&self, bytes_written: u64) {
        self.objects_matched.fetch_add(1, Ordering::Relaxed);
        self.bytes_written
            .fetch_add(bytes_written, Ordering::Relaxed);
    }

    pub fn record_warning(&self, key: &str, warning: &str) {
        self.warnings.lock().push(format!("{key}: {warning}"));
    }

    pub fn objects_listed(&self) -> u64 {
        self.objects_listed.load(Ordering::Relaxed)
    }

    /// Take a point-in-time summary; `completed_at` is set to now.
    pub fn summary(&self) -> SearchSummary {
        SearchSummary {
            started_at: self.started_at,
            completed_at: Some(Utc::now()),
            pages_listed: self.pages_listed.load(Ordering::Relaxed),
            objects_listed: self.objects_listed.load(Ordering::Relaxed),
            objects_fetched: self.objects_fetched.load(Ordering::Relaxed),
            objects_matched: self.objects_matched.load(Ordering::Relaxed),
            bytes_fetched: self.bytes_fetched.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
            warnings: self.warnings.lock().clone(),
        }
    }
}

/// Summary of a finished search run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchSummary {
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub pages_listed: u64,
    pub objects_listed: u64,
    pub objects_fetched: u64,
    pub objects_matched: u64,
    pub bytes_fetched: u64,
    pub bytes_written: u64,
    pub warnings: Vec<String>,
}

impl SearchSummary {
    pub fn duration(&self) -> Option<Duration> {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Objects fetched per second over the whole run.
    pub fn objects_per_second(&self) -> Option<f64> {
        self.duration().map(|d| {
            let secs = d.num_milliseconds() as f64 / 1000.0;
            if secs > 0.0 {
                self.objects_fetched as f64 / secs
            } else {
                0.0
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_counters() {
        let stats = SearchStats::new();
        assert_eq!(stats.record_page(), 0);
        assert_eq!(stats.record_page(), 1);
        stats.record_listed();
        stats.record_listed();
        stats.record_fetched(100);
        stats.record_fetched(50);
        stats.record_matched(100);

        let summary = stats.summary();
        assert_eq!(summary.pages_listed, 2);
        assert_eq!(summary.objects_listed, 2);
        assert_eq!(summary.objects_fetched, 2);
        assert_eq!(summary.bytes_fetched, 150);
        assert_eq!(summary.objects_matched, 1);
        assert_eq!(summary.bytes_written, 100);
        assert!(!summary.has_warnings());
    }

    #[test]
    fn test_stats_warnings() {
        let stats = SearchStats::new();
        stats.record_warning("k1", "malformed log document");

        let summary = stats.summary();
        assert!(summary.has_warnings());
        assert_eq!(summary.warnings, vec!["k1: malformed log document"]);
    }

    #[test]
    fn test_summary_duration() {
        let summary = SearchStats::new().summary();
        assert!(summary.duration().unwrap().num_milliseconds() >= 0);

        assert!(SearchSummary::default().duration().is_none());
    }
}
