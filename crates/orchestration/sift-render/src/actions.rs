//! Resource-to-action lookup table.

use sift_error::{Result, SiftError, StorageError};
use std::path::Path;
use tracing::{debug, info};

/// Phrase used when no entry matches a resource.
pub const UNKNOWN_ACTION: &str = "unknown action";

/// Ordered mapping of resource substrings to human-readable actions.
///
/// Entries are checked in order and the first pattern contained in the
/// resource wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTable {
    entries: Vec<(String, String)>,
}

impl Default for ActionTable {
    fn default() -> Self {
        Self::new().with_entry("auth/login", "log in")
    }
}

impl ActionTable {
    /// An empty table; every resource resolves to [`UNKNOWN_ACTION`].
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with_entry(mut self, pattern: impl Into<String>, action: impl Into<String>) -> Self {
        self.entries.push((pattern.into(), action.into()));
        self
    }

    /// Parse a CSV table with `pattern` and `action` columns.
    ///
    /// Rows with an empty pattern are skipped.
    pub fn parse_csv(content: &str) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| SiftError::Config(format!("Failed to parse action table headers: {e}")))?
            .clone();
        let column = |name: &str| {
            headers.iter().position(|h| h.trim() == name).ok_or_else(|| {
                SiftError::Config(format!(
                    "Column '{name}' not found in action table headers: {headers:?}"
                ))
            })
        };
        let pattern_idx = column("pattern")?;
        let action_idx = column("action")?;

        let mut table = Self::new();
        for (line, record) in reader.records().enumerate() {
            let record = record.map_err(|e| {
                SiftError::Config(format!("Invalid action table row {}: {e}", line + 2))
            })?;

            let pattern = record.get(pattern_idx).unwrap_or("");
            let action = record.get(action_idx).unwrap_or("");
            if pattern.is_empty() {
                debug!(line = line + 2, "Skipping action entry with empty pattern");
                continue;
            }
            table.entries.push((pattern.to_string(), action.to_string()));
        }

        Ok(table)
    }

    /// Load a CSV table from a file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SiftError::from(StorageError::read(path, e)))?;

        let table = Self::parse_csv(&content)?;
        info!(source = %path.display(), entries = table.len(), "Loaded action table");

        Ok(table)
    }

    /// The action for a resource path.
    pub fn resolve(&self, resource: &str) -> &str {
        self.entries
            .iter()
            .find(|(pattern, _)| resource.contains(pattern.as_str()))
            .map(|(_, action)| action.as_str())
            .unwrap_or(UNKNOWN_ACTION)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
