//! Extract module for turning crawled links into stored page text
//!
//! This module contains:
//! - Single-page content extraction (fetch, strip, render)
//! - The incremental pass over every link file

mod collection;
mod content;

pub use collection::{extract_all, extract_domain_pages, EXTRACTION_ERROR_PREFIX};
pub use content::{extract_text, fetch_and_extract, non_html_placeholder};
