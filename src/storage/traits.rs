//! Storage traits and error types
//!
//! This module defines the trait interface for page content backends and
//! associated error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Missing directory: {0}")]
    MissingDirectory(PathBuf),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for page content backends
///
/// The existence of a saved record is the incremental-skip marker: a page
/// that is already processed is never fetched again.
pub trait ContentStore {
    /// Returns true if content for `url` has already been saved under `domain`
    fn already_processed(&self, domain: &str, url: &str) -> bool;

    /// Saves extracted content for `url` under `domain`
    ///
    /// # Returns
    ///
    /// The location the content was written to
    fn save(&self, domain: &str, url: &str, content: &str) -> StorageResult<PathBuf>;
}
