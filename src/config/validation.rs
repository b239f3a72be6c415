use crate::config::types::{Config, CrawlerConfig, ExtractorConfig, PathsConfig, UserAgentConfig};
use crate::ConfigError;

/// Deepest crawl the configuration accepts
const MAX_ALLOWED_DEPTH: u32 = 10;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_extractor_config(&config.extractor)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_paths_config(&config.paths)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_depth > MAX_ALLOWED_DEPTH {
        return Err(ConfigError::Validation(format!(
            "max-depth must be between 0 and {}, got {}",
            MAX_ALLOWED_DEPTH, config.max_depth
        )));
    }

    if config.request_timeout == 0 {
        return Err(ConfigError::Validation(
            "crawler request-timeout must be greater than 0ms".to_string(),
        ));
    }

    Ok(())
}

/// Validates extractor configuration
fn validate_extractor_config(config: &ExtractorConfig) -> Result<(), ConfigError> {
    if config.request_timeout == 0 {
        return Err(ConfigError::Validation(
            "extractor request-timeout must be greater than 0ms".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.header.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent header cannot be empty".to_string(),
        ));
    }

    if config.header.contains(['\r', '\n']) {
        return Err(ConfigError::Validation(
            "user-agent header cannot contain line breaks".to_string(),
        ));
    }

    Ok(())
}

/// Validates input and output locations
fn validate_paths_config(config: &PathsConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("websites", &config.websites),
        ("href-dir", &config.href_dir),
        ("data-dir", &config.data_dir),
        ("structured-dir", &config.structured_dir),
        ("documents", &config.documents),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
    }

    Ok(())
}
