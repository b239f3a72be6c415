//! Shared helpers for the integration tests

use site_harvest::config::{Config, CrawlerConfig, UserAgentConfig};
use site_harvest::crawler::{build_http_client, Crawler};
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Crawler settings suited to tests: no pacing, short timeout
pub fn test_crawler_config(max_depth: u32) -> CrawlerConfig {
    CrawlerConfig {
        max_depth,
        request_delay: 0,
        request_timeout: 1_000,
    }
}

/// Builds a crawler against the default user agent
pub fn test_crawler(max_depth: u32) -> Crawler {
    let config = test_crawler_config(max_depth);
    let client = build_http_client(&UserAgentConfig::default(), config.request_timeout)
        .expect("client builds");
    Crawler::with_client(client, &config)
}

/// A full pipeline configuration rooted in `root`
pub fn test_config(root: &Path, max_depth: u32) -> Config {
    let mut config = Config::default();
    config.crawler = test_crawler_config(max_depth);
    config.extractor.request_delay = 0;
    config.extractor.request_timeout = 1_000;

    let at = |name: &str| root.join(name).to_string_lossy().into_owned();
    config.paths.websites = at("websites.txt");
    config.paths.href_dir = at("href");
    config.paths.data_dir = at("data");
    config.paths.structured_dir = at("structured_content");
    config.paths.documents = at("documents.jsonl");
    config
}

/// Wraps anchors in a minimal HTML page
pub fn html_page(title: &str, body: &str) -> String {
    format!(
        "<html><head><title>{}</title></head><body>{}</body></html>",
        title, body
    )
}

/// Mounts an HTML page at `route` that must be requested exactly `times` times
pub async fn mount_page(server: &MockServer, route: &str, html: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html"))
        .expect(times)
        .mount(server)
        .await;
}
