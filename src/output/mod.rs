//! Output module for merged content and run summaries
//!
//! This module handles:
//! - Merging per-page text into one structured file per domain
//! - Stripping URLs from merged text
//! - Recording and printing per-stage reports

pub mod merge;
pub mod stats;

pub use merge::{count_content_lines, merge_all, merge_domain, remove_urls, section_name, SECTION_RULE};
pub use stats::{
    print_crawl_reports, print_extraction_reports, print_merge_reports, CrawlReport,
    ExtractionReport, MergeReport,
};
