//! Object store access.
//!
//! This module provides the [`ObjectStore`] trait and its implementations:
//! - [`S3Store`] - An S3 bucket, listed with `ListObjects` markers
//! - [`MemoryStore`] - An in-memory bucket for tests and local runs

mod memory;
mod s3;

pub use memory::MemoryStore;
pub use s3::{S3Config, S3Store, create_s3_client};

use async_trait::async_trait;
use bytes::Bytes;
use sift_error::Result;

/// One page of a bucket listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPage {
    /// Keys in lexicographic order
    pub keys: Vec<String>,

    /// Whether the store reported more keys after this page
    pub truncated: bool,
}

/// A bucket that can be listed page by page and read object by object.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List up to `max_keys` keys strictly after `marker`.
    ///
    /// An empty marker starts the listing at the beginning of the bucket.
    async fn list_page(&self, marker: &str, max_keys: usize) -> Result<ListPage>;

    /// Fetch the full content of an object.
    async fn fetch(&self, key: &str) -> Result<Bytes>;

    /// Human-readable description for logging.
    fn describe(&self) -> String;
}
