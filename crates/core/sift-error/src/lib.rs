//! Error types for logsift.
//!
//! This crate provides:
//! - [`SiftError`] - Top-level error enum for both run modes
//! - Domain-specific errors ([`StoreError`], [`StorageError`])
//!
//! Every error that reaches the top of a run is fatal. Malformed log
//! documents are not errors; they surface as decode warnings instead.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level error type for logsift.
#[derive(Error, Debug)]
pub enum SiftError {
    /// Remote object store errors (listing, fetch)
    #[error("Object store error: {0}")]
    Store(#[from] StoreError),

    /// Local filesystem errors (create, read, write)
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors (wrapped anyhow)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Remote object store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Listing a page of the bucket failed
    #[error("Could not list bucket {bucket}: {message}")]
    List { bucket: String, message: String },

    /// Fetching an object failed
    #[error("Could not read object {key}: {message}")]
    Fetch { key: String, message: String },
}

/// Local filesystem errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Directory creation failed
    #[error("Could not create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing or appending to a file failed
    #[error("Could not write to file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Reading a file failed
    #[error("Could not read file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Enumerating a directory failed
    #[error("Could not read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl StorageError {
    pub fn create_dir(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::CreateDir {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn write(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn read(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn read_dir(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::ReadDir {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// The filesystem path the failed operation targeted.
    pub fn path(&self) -> &Path {
        match self {
            Self::CreateDir { path, .. }
            | Self::Write { path, .. }
            | Self::Read { path, .. }
            | Self::ReadDir { path, .. } => path,
        }
    }
}

/// Result type alias using SiftError.
pub type Result<T> = std::result::Result<T, SiftError>;
