//! Crawler module for link discovery
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching
//! - HTML parsing and anchor extraction
//! - Fixed-delay pacing
//! - The breadth-first frontier
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod pacer;
mod parser;

pub use coordinator::{crawl_sites, CrawlOutcome, Crawler};
pub use fetcher::{build_http_client, fetch_page, FetchedPage};
pub use frontier::{Frontier, FrontierEntry};
pub use pacer::Pacer;
pub use parser::{parse_html, ParsedPage};

pub(crate) use parser::extract_title;
