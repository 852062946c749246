//! Core data types for logsift.
//!
//! This crate provides the types shared by the search and render pipelines:
//!
//! - [`LogRecord`] - A structured log document with lenient decoding
//! - [`KeywordSet`] - The ordered keyword filter loaded once per run
//! - Path naming helpers that map user ids and object keys onto the
//!   two-level `<root>/<userId>/<file>` layout

pub mod keywords;
pub mod naming;
pub mod record;

pub use keywords::KeywordSet;
pub use naming::{NULL_USER, object_file_name, user_dir_name};
pub use record::{Decoded, LogData, LogMeta, LogRecord};
