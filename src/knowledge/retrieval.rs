//! Seams for the external vector store and conversational agent
//!
//! Neither a vector database nor an LLM ships with this crate. Callers plug
//! their own implementations into these traits and hand them to the
//! components that need them.

use crate::knowledge::{Document, KnowledgeError};
use std::sync::Arc;

/// Number of hits retrieved when the caller does not say otherwise
pub const DEFAULT_TOP_K: usize = 3;

const NO_RESULTS: &str = "No relevant information found in the knowledge base.";

/// Similarity-search backend holding embedded documents
pub trait VectorStore: Send + Sync {
    /// Inserts or replaces documents
    fn upsert(&self, documents: &[Document]) -> Result<(), KnowledgeError>;

    /// Returns up to `k` documents most relevant to `query`
    fn search(&self, query: &str, k: usize) -> Result<Vec<Document>, KnowledgeError>;
}

/// Conversational agent answering user queries
///
/// `thread_id` identifies the conversation; how history is kept per thread
/// is up to the implementation.
pub trait Responder: Send + Sync {
    fn respond(&self, query: &str, thread_id: &str) -> Result<String, KnowledgeError>;
}

/// Sends documents to a store in fixed-size batches
///
/// # Returns
///
/// * `Ok(usize)` - Number of documents uploaded
/// * `Err(KnowledgeError)` - The store rejected a batch; earlier batches stay uploaded
pub fn upload_documents(
    store: &dyn VectorStore,
    documents: &[Document],
    batch_size: usize,
) -> Result<usize, KnowledgeError> {
    let batch_size = batch_size.max(1);
    let mut uploaded = 0;

    for batch in documents.chunks(batch_size) {
        store.upsert(batch)?;
        uploaded += batch.len();
        tracing::debug!("Uploaded {}/{} documents", uploaded, documents.len());
    }

    Ok(uploaded)
}

/// Retrieval tool an agent calls to look up site content
///
/// The store is passed in at construction; there is no process-wide handle.
#[derive(Clone)]
pub struct KnowledgeBaseTool {
    store: Arc<dyn VectorStore>,
}

impl KnowledgeBaseTool {
    pub fn new(store: Arc<dyn VectorStore>) -> Self {
        Self { store }
    }

    /// Searches the store and formats the hits for an agent
    ///
    /// Errors are returned as text so the agent can relay them instead of
    /// failing the conversation turn.
    pub fn retrieve(&self, query: &str, k: usize) -> String {
        tracing::info!("Searching knowledge base for query: {}", query);

        match self.store.search(query, k) {
            Ok(hits) if hits.is_empty() => NO_RESULTS.to_string(),
            Ok(hits) => hits
                .iter()
                .take(k)
                .map(format_hit)
                .collect::<Vec<_>>()
                .join("\n\n"),
            Err(e) => {
                tracing::error!("Knowledge base search failed: {}", e);
                format!("Error searching knowledge base: {}", e)
            }
        }
    }
}

fn format_hit(document: &Document) -> String {
    format!(
        "Source: {}\nSection: {}\nInfo: {}",
        document.metadata.source, document.metadata.section, document.page_content
    )
}
