//! Destinations for matched objects.

use async_trait::async_trait;
use sift_error::{Result, StorageError};
use sift_types::{object_file_name, user_dir_name};
use std::path::{Path, PathBuf};
use tracing::trace;

/// Trait for persisting matched objects.
#[async_trait]
pub trait MatchSink: Send + Sync {
    /// Persist the raw content of a matched object for a user.
    ///
    /// Returns the location the content was written to.
    async fn persist(&self, user_id: &str, key: &str, content: &[u8]) -> Result<PathBuf>;
}

/// Writes matches to `<root>/<userId>/<objectKey>.json`.
///
/// User directories are created on demand; creating one that already exists
/// is not an error. Content is written unmodified and an existing file for
/// the same key is replaced.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The path a match for `user_id` and `key` is written to.
    pub fn path_for(&self, user_id: &str, key: &str) -> PathBuf {
        self.root
            .join(user_dir_name(user_id))
            .join(object_file_name(key))
    }
}

#[async_trait]
impl MatchSink for DirectorySink {
    async fn persist(&self, user_id: &str, key: &str, content: &[u8]) -> Result<PathBuf> {
        let dir = self.root.join(user_dir_name(user_id));
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| StorageError::create_dir(&dir, e))?;

        let path = dir.join(object_file_name(key));
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| StorageError::write(&path, e))?;

        trace!(path = %path.display(), bytes = content.len(), "Persisted match");
        Ok(path)
    }
}
