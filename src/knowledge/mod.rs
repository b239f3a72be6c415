//! Knowledge module for preparing and serving site content
//!
//! This module contains:
//! - Splitting merged content into documents
//! - JSON-lines export of documents
//! - Trait seams for the vector store and conversational agent
//! - The retrieval tool exposed to an agent

mod documents;
mod retrieval;

pub use documents::{
    build_documents, clean_content, documents_from_merged, read_documents, write_documents,
    Document, DocumentMetadata,
};
pub use retrieval::{
    upload_documents, KnowledgeBaseTool, Responder, VectorStore, DEFAULT_TOP_K,
};

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or serving knowledge-base documents
#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Missing directory: {0}")]
    MissingDirectory(PathBuf),

    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid document on line {line}: {source}")]
    InvalidDocument {
        line: usize,
        source: serde_json::Error,
    },

    #[error("Vector store error: {0}")]
    Store(String),

    #[error("Responder error: {0}")]
    Responder(String),
}

impl KnowledgeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
