//! Configuration types for a search run.

use serde::{Deserialize, Serialize};

/// Maximum number of keys requested per listing call.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Configuration for a search run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Keys requested per listing page
    pub page_size: usize,

    /// Number of concurrent fetch-and-match workers
    pub workers: usize,

    /// Per-worker channel buffer; bounds the keys queued ahead of a worker
    pub channel_buffer: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            workers: default_workers(),
            channel_buffer: 64,
        }
    }
}

impl SearchConfig {
    /// Create a new search configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the listing page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the number of workers.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the per-worker channel buffer size.
    pub fn with_channel_buffer(mut self, size: usize) -> Self {
        self.channel_buffer = size;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.page_size == 0 {
            return Err("page_size must be at least 1".to_string());
        }
        if self.workers == 0 {
            return Err("workers must be at least 1".to_string());
        }
        if self.channel_buffer == 0 {
            return Err("channel_buffer must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Fetches are I/O bound, so default to a few workers per core.
fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get() * 4)
        .unwrap_or(8)
}
