//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the pipeline, including:
//! - Building HTTP clients with the configured user agent and timeout
//! - GET requests to fetch page content
//! - Content-Type inspection
//! - Error classification

use crate::config::UserAgentConfig;
use crate::FetchError;
use reqwest::{redirect::Policy, Client, Response};
use std::time::Duration;

/// Maximum redirect hops followed for a single request
const MAX_REDIRECTS: usize = 10;

/// Result of a successful fetch
#[derive(Debug)]
pub enum FetchedPage {
    /// An HTML document
    Html {
        /// Page body content
        body: String,
    },

    /// Any other content; the body is not read
    NonHtml {
        /// The Content-Type header, if the server sent one
        content_type: Option<String>,
    },
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout_ms` - Whole-request timeout in milliseconds
///
/// # Example
///
/// ```no_run
/// use site_harvest::config::UserAgentConfig;
/// use site_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), 10_000).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig, timeout_ms: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header.clone())
        .timeout(Duration::from_millis(timeout_ms))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL
///
/// # Request Flow
///
/// 1. Send GET request (redirects followed up to 10 hops)
/// 2. Non-2xx status → `FetchError::Status`
/// 3. Content-Type without `text/html` → `FetchedPage::NonHtml`
/// 4. Otherwise read the body → `FetchedPage::Html`
///
/// Nothing is retried.
pub async fn fetch_page(client: &Client, url: &str) -> Result<FetchedPage, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = content_type(&response);
    let is_html = content_type
        .as_deref()
        .is_some_and(|ct| ct.to_lowercase().contains("text/html"));

    if !is_html {
        return Ok(FetchedPage::NonHtml { content_type });
    }

    let body = response.text().await.map_err(|e| classify_error(url, e))?;

    Ok(FetchedPage::Html { body })
}

/// Reads the Content-Type header value
fn content_type(response: &Response) -> Option<String> {
    response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Maps a transport error onto the fetch error taxonomy
fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
