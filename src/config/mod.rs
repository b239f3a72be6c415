//! Configuration module for Site-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, and reading the list of seed websites.
//!
//! # Example
//!
//! ```no_run
//! use site_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, ExtractorConfig, PathsConfig, UserAgentConfig, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, load_seeds};
pub use validation::validate;
