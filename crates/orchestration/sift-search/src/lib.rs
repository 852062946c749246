//! sift-search - keyword search over an S3 bucket.
//!
//! This crate walks a bucket listing page by page, fetches every object,
//! and persists the ones containing any configured keyword under a
//! per-user directory. It supports:
//!
//! - Marker-based pagination with fixed-size pages
//! - A bounded worker pool fed round-robin through bounded channels
//! - A completion barrier: a run returns only after every worker finished
//! - Fail-stop error handling: the first listing, fetch or write error ends
//!   the run
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use sift_search::{DirectorySink, S3Config, S3Store, SearchConfig, Searcher, create_s3_client};
//! use sift_types::KeywordSet;
//!
//! let s3_config = S3Config::new("audit-logs").with_region("us-east-1");
//! let client = create_s3_client(&s3_config).await?;
//! let store = S3Store::new(client, &s3_config);
//!
//! let keywords = KeywordSet::load("keywords.csv").await?;
//! let searcher = Searcher::new(
//!     Arc::new(store),
//!     Arc::new(DirectorySink::new("logs")),
//!     keywords,
//!     SearchConfig::new(),
//! );
//!
//! let summary = searcher.run().await?;
//! eprintln!("Matched {} of {} objects", summary.objects_matched, summary.objects_listed);
//! ```

pub mod config;
pub mod paginate;
pub mod router;
pub mod searcher;
pub mod sink;
pub mod stats;
pub mod store;
pub mod worker;

pub use config::{DEFAULT_PAGE_SIZE, SearchConfig};
pub use paginate::list_keys;
pub use router::WorkRouter;
pub use searcher::Searcher;
pub use sink::{DirectorySink, MatchSink};
pub use stats::{SearchStats, SearchSummary};
pub use store::{ListPage, MemoryStore, ObjectStore, S3Config, S3Store, create_s3_client};
pub use worker::{MatchWorker, Outcome};
