//! Incremental extraction pass over every crawled link file
//!
//! A URL whose content file already exists is skipped without a request,
//! so an interrupted pass can simply be run again.

use crate::config::Config;
use crate::crawler::{build_http_client, Pacer};
use crate::extract::content::fetch_and_extract;
use crate::output::ExtractionReport;
use crate::storage::{ContentStore, FileStore, LinkStore, StorageError};
use crate::HarvestError;
use chrono::Utc;
use reqwest::Client;
use std::path::Path;

/// Prefix of the record stored when a page cannot be extracted
pub const EXTRACTION_ERROR_PREFIX: &str = "Error extracting content: ";

/// Extracts every URL of one domain into the store
///
/// Fetch failures are persisted as error records so they are not retried on
/// the next pass. A failed write is logged and counted; the pass continues.
pub async fn extract_domain_pages(
    client: &Client,
    pacer: &Pacer,
    store: &dyn ContentStore,
    domain: &str,
    urls: &[String],
) -> ExtractionReport {
    let mut report = ExtractionReport::new(domain, urls.len());
    let total = urls.len();

    tracing::info!("Processing {} URLs for {}", total, domain);

    for (i, url) in urls.iter().enumerate() {
        if store.already_processed(domain, url) {
            tracing::debug!("[{}/{}] Already processed: {}", i + 1, total, url);
            report.skipped += 1;
            continue;
        }

        tracing::debug!("[{}/{}] Extracting: {}", i + 1, total, url);
        pacer.wait().await;

        let content = match fetch_and_extract(client, url).await {
            Ok(content) => {
                report.processed += 1;
                content
            }
            Err(e) => {
                tracing::warn!("Error extracting {}: {}", url, e);
                report.failed += 1;
                format!("{}{}", EXTRACTION_ERROR_PREFIX, e)
            }
        };

        match store.save(domain, url, &content) {
            Ok(path) => tracing::debug!("Saved content to {}", path.display()),
            Err(e) => {
                tracing::warn!("Error saving {}: {}", url, e);
                report.write_errors += 1;
            }
        }
    }

    report.finished_at = Utc::now();
    report
}

/// Runs the extraction pass for every link file
///
/// Link files are processed in sorted domain order.
///
/// # Returns
///
/// * `Ok(Vec<ExtractionReport>)` - One report per domain
/// * `Err(HarvestError)` - The link directory is missing or the data directory
///   cannot be created
pub async fn extract_all(config: &Config) -> Result<Vec<ExtractionReport>, HarvestError> {
    let href_dir = Path::new(&config.paths.href_dir);
    let data_dir = Path::new(&config.paths.data_dir);

    let link_store = LinkStore::new(href_dir);
    let domains = match link_store.domains() {
        Ok(domains) => domains,
        Err(StorageError::MissingDirectory(dir)) => {
            return Err(HarvestError::MissingInput(format!(
                "link directory {} not found",
                dir.display()
            )));
        }
        Err(e) => return Err(e.into()),
    };

    std::fs::create_dir_all(data_dir)?;

    let client = build_http_client(&config.user_agent, config.extractor.request_timeout)?;
    let pacer = Pacer::new(config.extractor.request_delay);
    let store = FileStore::new(data_dir);

    let mut reports = Vec::with_capacity(domains.len());
    for domain in domains {
        let urls = match link_store.read(&domain) {
            Ok(urls) => urls,
            Err(e) => {
                tracing::warn!("Cannot read links for {}: {}", domain, e);
                continue;
            }
        };

        let report = extract_domain_pages(&client, &pacer, &store, &domain, &urls).await;
        tracing::info!(
            "Completed {}: {} extracted, {} skipped, {} failed",
            domain,
            report.processed,
            report.skipped,
            report.failed
        );
        reports.push(report);
    }

    Ok(reports)
}
