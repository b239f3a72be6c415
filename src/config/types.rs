use serde::Deserialize;

/// Browser-like identification sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for Site-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub extractor: ExtractorConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub paths: PathsConfig,
}

/// Link crawl behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of hops from the seed URL
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Pause before every request (milliseconds)
    #[serde(rename = "request-delay")]
    pub request_delay: u64,

    /// Request timeout (milliseconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            request_delay: 500,
            request_timeout: 10_000,
        }
    }
}

/// Content extraction behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Pause before every request (milliseconds)
    #[serde(rename = "request-delay")]
    pub request_delay: u64,

    /// Request timeout (milliseconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            request_delay: 500,
            request_timeout: 15_000,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Value of the User-Agent header
    pub header: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            header: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Input and output locations
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Newline-delimited list of seed URLs
    pub websites: String,

    /// Directory holding one link file per crawled host
    #[serde(rename = "href-dir")]
    pub href_dir: String,

    /// Directory holding one sub-directory of page files per host
    #[serde(rename = "data-dir")]
    pub data_dir: String,

    /// Directory holding one merged content file per host
    #[serde(rename = "structured-dir")]
    pub structured_dir: String,

    /// JSON-lines file of knowledge-base documents
    pub documents: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            websites: "websites.txt".to_string(),
            href_dir: "href".to_string(),
            data_dir: "data".to_string(),
            structured_dir: "structured_content".to_string(),
            documents: "documents.jsonl".to_string(),
        }
    }
}
