//! Storage module for persisting pipeline output
//!
//! This module handles all filesystem persistence, including:
//! - Per-host link files written by the crawler
//! - Per-page content files written by the extractor
//! - The already-processed check that makes extraction resumable

mod fs;
mod traits;

pub use fs::{sanitize_filename, FileStore, LinkStore};
pub use traits::{ContentStore, StorageError, StorageResult};
