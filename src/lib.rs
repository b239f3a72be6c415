//! Site-Harvest: a website-to-knowledge-base pipeline
//!
//! This crate crawls seed websites breadth-first within their own host,
//! records every discovered link, extracts readable text from each page and
//! prepares that text as documents for a retrieval-augmented chatbot.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod knowledge;
pub mod output;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Knowledge base error: {0}")]
    Knowledge(#[from] knowledge::KnowledgeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing input: {0}")]
    MissingInput(String),
}

/// Errors raised while fetching a single page
///
/// A fetch error never aborts a run: the crawler treats the page as having
/// no links, the extractor persists the error message in place of content.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Site-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

// Re-export commonly used types
pub use config::Config;
pub use crate::url::{classify, normalize_url, scope_host, LinkClass};
