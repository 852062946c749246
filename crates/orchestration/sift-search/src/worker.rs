//! Fetch, match and persist a single object.

use sift_error::Result;
use sift_types::{KeywordSet, LogRecord};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::sink::MatchSink;
use crate::stats::SearchStats;
use crate::store::ObjectStore;

/// What happened to one object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No keyword matched; nothing was written
    Skipped,
    /// A keyword matched and the content was persisted
    Persisted { keyword: String, path: PathBuf },
}

/// Processes listed keys: fetch the object, test it against the keyword set
/// and persist matches under the record's user.
pub struct MatchWorker<S: ?Sized, K: ?Sized> {
    store: Arc<S>,
    sink: Arc<K>,
    keywords: Arc<KeywordSet>,
    stats: Arc<SearchStats>,
}

impl<S: ?Sized, K: ?Sized> Clone for MatchWorker<S, K> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            sink: Arc::clone(&self.sink),
            keywords: Arc::clone(&self.keywords),
            stats: Arc::clone(&self.stats),
        }
    }
}

impl<S, K> MatchWorker<S, K>
where
    S: ObjectStore + ?Sized,
    K: MatchSink + ?Sized,
{
    pub fn new(
        store: Arc<S>,
        sink: Arc<K>,
        keywords: Arc<KeywordSet>,
        stats: Arc<SearchStats>,
    ) -> Self {
        Self {
            store,
            sink,
            keywords,
            stats,
        }
    }

    /// Process one object key.
    ///
    /// Fetch and write errors are returned to the caller; a document that
    /// does not decode is still persisted and only recorded as a warning.
    pub async fn process(&self, key: &str) -> Result<Outcome> {
        let content = self.store.fetch(key).await?;
        self.stats.record_fetched(content.len() as u64);

        let Some(keyword) = self.keywords.first_match(&content) else {
            debug!(key = key, "No keyword match");
            return Ok(Outcome::Skipped);
        };

        let decoded = LogRecord::decode(&content);
        if let Some(warning) = &decoded.warning {
            warn!(key = key, warning = %warning, "Persisting log with default fields");
            self.stats.record_warning(key, warning);
        }

        let path = self
            .sink
            .persist(decoded.record.user_id(), key, &content)
            .await?;
        self.stats.record_matched(content.len() as u64);

        debug!(
            key = key,
            keyword = keyword,
            user = decoded.record.user_id(),
            path = %path.display(),
            "Persisted match"
        );

        Ok(Outcome::Persisted {
            keyword: keyword.to_string(),
            path,
        })
    }
}
