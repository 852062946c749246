//! Statistics for render runs.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Summary of a render run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderSummary {
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,

    /// Number of log files rendered
    pub files_rendered: usize,

    /// Number of distinct users with at least one rendered log
    pub users: usize,

    /// Entries under the logs root that were not files in a user directory
    pub entries_skipped: usize,

    /// Decode warnings, one per affected file
    pub warnings: Vec<String>,

    #[serde(skip)]
    seen_users: BTreeSet<String>,
}

impl RenderSummary {
    pub fn new() -> Self {
        Self {
            started_at: Some(Utc::now()),
            ..Default::default()
        }
    }

    pub fn record_rendered(&mut self, user_dir: &str) {
        self.files_rendered += 1;
        if self.seen_users.insert(user_dir.to_string()) {
            self.users += 1;
        }
    }

    pub fn record_skipped(&mut self) {
        self.entries_skipped += 1;
    }

    pub fn record_warning(&mut self, file: impl std::fmt::Display, warning: &str) {
        self.warnings.push(format!("{file}: {warning}"));
    }

    pub fn complete(&mut self) {
        self.completed_at = Some(Utc::now());
    }

    pub fn duration(&self) -> Option<Duration> {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
