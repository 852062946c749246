//! In-memory object store.

use async_trait::async_trait;
use bytes::Bytes;
use sift_error::{Result, StoreError};
use std::collections::{BTreeMap, HashSet};
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{ListPage, ObjectStore};

/// A bucket held in memory.
///
/// Besides local runs it can simulate misbehaving stores: fetches that fail
/// for chosen keys, and markers that do not advance past the marker key.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: BTreeMap<String, Bytes>,
    failing_keys: HashSet<String>,
    inclusive_marker: bool,
    list_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object.
    pub fn with_object(mut self, key: impl Into<String>, content: impl Into<Bytes>) -> Self {
        self.insert(key, content);
        self
    }

    /// Make fetches of `key` fail.
    pub fn with_failing_key(mut self, key: impl Into<String>) -> Self {
        self.failing_keys.insert(key.into());
        self
    }

    /// List keys starting *at* the marker instead of after it.
    pub fn with_inclusive_marker(mut self, inclusive: bool) -> Self {
        self.inclusive_marker = inclusive;
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, content: impl Into<Bytes>) {
        self.objects.insert(key.into(), content.into());
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Number of listing calls served so far.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Number of fetch calls served so far.
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list_page(&self, marker: &str, max_keys: usize) -> Result<ListPage> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        let start = if marker.is_empty() {
            Bound::Unbounded
        } else if self.inclusive_marker {
            Bound::Included(marker)
        } else {
            Bound::Excluded(marker)
        };

        let mut remaining = self
            .objects
            .range::<str, _>((start, Bound::Unbounded))
            .map(|(key, _)| key.clone());

        let keys: Vec<String> = remaining.by_ref().take(max_keys).collect();
        let truncated = remaining.next().is_some();

        Ok(ListPage { keys, truncated })
    }

    async fn fetch(&self, key: &str) -> Result<Bytes> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);

        if self.failing_keys.contains(key) {
            return Err(StoreError::Fetch {
                key: key.to_string(),
                message: "simulated fetch failure".to_string(),
            }
            .into());
        }

        self.objects.get(key).cloned().ok_or_else(|| {
            StoreError::Fetch {
                key: key.to_string(),
                message: "NoSuchKey".to_string(),
            }
            .into()
        })
    }

    fn describe(&self) -> String {
        format!("memory ({} objects)", self.objects.len())
    }
}
