//! Run reports for each pipeline stage
//!
//! This module provides the per-seed and per-domain summaries the stages
//! return, and functions for displaying them.

use crate::crawler::CrawlOutcome;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Summary of one seed's crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// The seed as given
    pub seed: String,

    /// Host the crawl was limited to
    pub scope_host: String,

    /// Number of unique links written
    pub links_recorded: usize,

    /// Number of pages dequeued and processed
    pub pages_visited: usize,

    /// Pages fetched successfully
    pub pages_fetched: usize,

    /// Pages whose fetch failed
    pub fetch_failures: usize,

    /// Link file written, if the write succeeded
    pub link_file: Option<PathBuf>,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    /// Builds a report from a finished crawl
    pub fn from_outcome(outcome: &CrawlOutcome, link_file: Option<PathBuf>) -> Self {
        Self {
            seed: outcome.seed.clone(),
            scope_host: outcome.scope_host.clone(),
            links_recorded: outcome.links.len(),
            pages_visited: outcome.visited.len(),
            pages_fetched: outcome.pages_fetched,
            fetch_failures: outcome.fetch_failures,
            link_file,
            started_at: outcome.started_at,
            finished_at: outcome.finished_at,
        }
    }

    /// Wall-clock duration of the crawl in seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

/// Summary of one domain's extraction pass
#[derive(Debug, Clone)]
pub struct ExtractionReport {
    pub domain: String,

    /// URLs listed in the domain's link file
    pub urls: usize,

    /// Pages fetched and extracted
    pub processed: usize,

    /// URLs skipped because their content file already existed
    pub skipped: usize,

    /// URLs whose fetch failed (stored as error records)
    pub failed: usize,

    /// Content files that could not be written
    pub write_errors: usize,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ExtractionReport {
    /// Creates an empty report starting now
    pub fn new(domain: &str, urls: usize) -> Self {
        let now = Utc::now();
        Self {
            domain: domain.to_string(),
            urls,
            processed: 0,
            skipped: 0,
            failed: 0,
            write_errors: 0,
            started_at: now,
            finished_at: now,
        }
    }

    /// Number of URLs that triggered a request
    pub fn fetched(&self) -> usize {
        self.processed + self.failed
    }
}

/// Summary of one domain's merge
#[derive(Debug, Clone)]
pub struct MergeReport {
    pub domain: String,

    /// Merged file written
    pub output: PathBuf,

    /// Page files included as sections
    pub files_merged: usize,

    /// Page files left out (too short or unreadable)
    pub files_skipped: usize,
}

/// Prints crawl reports to stdout
pub fn print_crawl_reports(reports: &[CrawlReport]) {
    println!("=== Crawl Summary ===\n");

    for report in reports {
        println!("{} ({})", report.scope_host, report.seed);
        println!("  Links recorded: {}", report.links_recorded);
        println!("  Pages visited: {}", report.pages_visited);
        println!("  Fetch failures: {}", report.fetch_failures);
        println!("  Duration: {}s", report.duration_seconds());
        match &report.link_file {
            Some(path) => println!("  Saved to: {}", path.display()),
            None => println!("  Link file was not written"),
        }
        println!();
    }

    let total_links: usize = reports.iter().map(|r| r.links_recorded).sum();
    println!(
        "Crawled {} site(s), {} links recorded",
        reports.len(),
        total_links
    );
}

/// Prints extraction reports to stdout
pub fn print_extraction_reports(reports: &[ExtractionReport]) {
    println!("=== Extraction Summary ===\n");

    for report in reports {
        println!("{}", report.domain);
        println!("  URLs: {}", report.urls);
        println!("  Extracted: {}", report.processed);
        println!("  Already processed: {}", report.skipped);
        println!("  Failed: {}", report.failed);
        if report.write_errors > 0 {
            println!("  Write errors: {}", report.write_errors);
        }
        println!();
    }

    let fetched: usize = reports.iter().map(ExtractionReport::fetched).sum();
    let skipped: usize = reports.iter().map(|r| r.skipped).sum();
    println!("Fetched {} page(s), skipped {}", fetched, skipped);
}

/// Prints merge reports to stdout
pub fn print_merge_reports(reports: &[MergeReport]) {
    println!("=== Merge Summary ===\n");

    for report in reports {
        println!(
            "{}: merged {} file(s), skipped {} -> {}",
            report.domain,
            report.files_merged,
            report.files_skipped,
            report.output.display()
        );
    }
}
