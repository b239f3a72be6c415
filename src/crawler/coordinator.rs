//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties together:
//! - The breadth-first frontier
//! - Request pacing and fetching
//! - Anchor extraction and link classification
//! - Writing one link file per crawled host

use crate::config::{Config, CrawlerConfig};
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchedPage};
use crate::crawler::frontier::Frontier;
use crate::crawler::pacer::Pacer;
use crate::crawler::parser::parse_html;
use crate::output::CrawlReport;
use crate::storage::LinkStore;
use crate::url::{classify, resolve_link, scope_host};
use crate::HarvestError;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use url::Url;

/// Everything a single crawl run produced
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// The seed line as given, with surrounding whitespace trimmed
    pub seed: String,

    /// Host the crawl was scoped to
    pub scope_host: String,

    /// Every recorded link, sorted and deduplicated
    pub links: BTreeSet<String>,

    /// Normalized keys of every processed page
    pub visited: HashSet<String>,

    /// Pages fetched successfully (HTML or not)
    pub pages_fetched: usize,

    /// Pages whose fetch failed
    pub fetch_failures: usize,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Bounded-depth, single-host crawler
///
/// Fetches are awaited one at a time; there is never more than one request
/// in flight.
pub struct Crawler {
    client: Client,
    pacer: Pacer,
    max_depth: u32,
}

impl Crawler {
    /// Creates a new crawler from the pipeline configuration
    pub fn new(config: &Config) -> Result<Self, HarvestError> {
        let client = build_http_client(&config.user_agent, config.crawler.request_timeout)?;
        Ok(Self::with_client(client, &config.crawler))
    }

    /// Creates a crawler that uses an already-built client
    pub fn with_client(client: Client, config: &CrawlerConfig) -> Self {
        Self {
            client,
            pacer: Pacer::new(config.request_delay),
            max_depth: config.max_depth,
        }
    }

    /// Crawls one site breadth-first starting at `seed`
    ///
    /// A fetch failure is logged and the page contributes no links; the
    /// crawl continues with the rest of the frontier.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlOutcome)` - The crawl ran to completion
    /// * `Err(HarvestError)` - The seed is not a crawlable URL
    pub async fn crawl(&self, seed: &str) -> Result<CrawlOutcome, HarvestError> {
        let seed = seed.trim();
        let host = scope_host(seed)?;
        let seed_url = Url::parse(seed)?;
        let started_at = Utc::now();

        let mut frontier = Frontier::new(seed_url, self.max_depth);
        let mut links = BTreeSet::new();
        links.insert(seed.to_string());

        let mut pages_fetched = 0;
        let mut fetch_failures = 0;

        tracing::info!("Crawling {} (max depth {})", host, self.max_depth);

        while let Some(entry) = frontier.next_entry() {
            tracing::debug!("Crawling: {} (depth {})", entry.url, entry.depth);

            self.pacer.wait().await;

            let body = match fetch_page(&self.client, entry.url.as_str()).await {
                Ok(FetchedPage::Html { body }) => body,
                Ok(FetchedPage::NonHtml { content_type }) => {
                    tracing::debug!(
                        "Skipping links of non-HTML page {} ({})",
                        entry.url,
                        content_type.as_deref().unwrap_or("unknown")
                    );
                    pages_fetched += 1;
                    continue;
                }
                Err(e) => {
                    tracing::warn!("Error crawling {}: {}", entry.url, e);
                    fetch_failures += 1;
                    continue;
                }
            };
            pages_fetched += 1;

            let parsed = parse_html(&body);
            for href in &parsed.hrefs {
                let class = classify(href, &entry.url, &host);
                if !class.is_recorded() {
                    continue;
                }

                let Some(resolved) = resolve_link(href, &entry.url) else {
                    continue;
                };

                links.insert(resolved.to_string());

                if class.should_follow() && frontier.offer(resolved, entry.depth) {
                    tracing::trace!("Enqueued link from {} at depth {}", entry.url, entry.depth + 1);
                }
            }

            if pages_fetched % 10 == 0 {
                tracing::info!(
                    "Progress: {} pages fetched, {} in frontier, {} links recorded",
                    pages_fetched,
                    frontier.len(),
                    links.len()
                );
            }
        }

        Ok(CrawlOutcome {
            seed: seed.to_string(),
            scope_host: host,
            links,
            visited: frontier.into_visited(),
            pages_fetched,
            fetch_failures,
            started_at,
            finished_at: Utc::now(),
        })
    }
}

/// Crawls every seed and writes one link file per host
///
/// A seed that cannot be crawled is logged and gets no report. A seed whose
/// link file cannot be written is reported with no link file. The remaining
/// seeds still run either way.
///
/// # Arguments
///
/// * `config` - The pipeline configuration
/// * `seeds` - Seed lines as written in the websites file, one crawl each
///
/// # Returns
///
/// One report per crawled seed, in seed order
pub async fn crawl_sites(config: &Config, seeds: &[String]) -> Result<Vec<CrawlReport>, HarvestError> {
    let crawler = Crawler::new(config)?;
    let link_store = LinkStore::new(Path::new(&config.paths.href_dir));
    let mut reports = Vec::with_capacity(seeds.len());

    for seed in seeds {
        let outcome = match crawler.crawl(seed).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Cannot crawl {}: {}", seed, e);
                continue;
            }
        };

        let link_file = match link_store.write(&outcome.scope_host, &outcome.links) {
            Ok(path) => {
                tracing::info!(
                    "Saved {} unique links for {} to {}",
                    outcome.links.len(),
                    outcome.scope_host,
                    path.display()
                );
                Some(path)
            }
            Err(e) => {
                tracing::warn!("Failed to write links for {}: {}", outcome.scope_host, e);
                None
            }
        };

        reports.push(CrawlReport::from_outcome(&outcome, link_file));
    }

    Ok(reports)
}
