//! Crawl statistics
//!
//! Counters are updated from whichever worker happens to be handling a
//! response, so they are plain atomics. A [`StatsSnapshot`] freezes them for
//! reporting once the crawl has drained.

use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters for one crawl session
#[derive(Debug, Default)]
pub struct CrawlStats {
    folders_discovered: AtomicU64,
    files_discovered: AtomicU64,
    files_saved: AtomicU64,
    responses_skipped: AtomicU64,
    fetch_failures: AtomicU64,
}

impl CrawlStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_folder(&self) {
        self.folders_discovered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_file(&self) {
        self.files_discovered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_saved(&self) {
        self.files_saved.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_skip(&self) {
        self.responses_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            folders_discovered: self.folders_discovered.load(Ordering::Relaxed),
            files_discovered: self.files_discovered.load(Ordering::Relaxed),
            files_saved: self.files_saved.load(Ordering::Relaxed),
            responses_skipped: self.responses_skipped.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
        }
    }
}

/// Frozen view of the counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Folders registered (including synthesized placeholders)
    pub folders_discovered: u64,

    /// Files registered from document lists
    pub files_discovered: u64,

    /// Files successfully written to the destination
    pub files_saved: u64,

    /// Responses that produced no side effects (malformed or mismatched)
    pub responses_skipped: u64,

    /// Fetches that failed outright (network error or non-2xx)
    pub fetch_failures: u64,
}
