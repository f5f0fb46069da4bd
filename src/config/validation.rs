use crate::config::types::{AnalyzerConfig, Config, CrawlerConfig, ProgressConfig, ServerConfig};
use crate::ConfigError;
use std::net::SocketAddr;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_server_config(&config.server)?;
    validate_crawler_config(&config.crawler)?;
    validate_analyzer_config(&config.analyzer)?;
    validate_progress_config(&config.progress)?;
    Ok(())
}

/// Validates server configuration
fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    config.bind_address.parse::<SocketAddr>().map_err(|e| {
        ConfigError::Validation(format!(
            "bind_address must be a socket address, got '{}': {}",
            config.bind_address, e
        ))
    })?;

    if config.max_duration_secs == 0 {
        return Err(ConfigError::Validation(
            "max_duration_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.default_max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "default_max_pages must be >= 1, got {}",
            config.default_max_pages
        )));
    }

    if config.max_pages_limit < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages_limit must be >= 1, got {}",
            config.max_pages_limit
        )));
    }

    if config.default_max_pages > config.max_pages_limit {
        return Err(ConfigError::Validation(format!(
            "default_max_pages ({}) cannot exceed max_pages_limit ({})",
            config.default_max_pages, config.max_pages_limit
        )));
    }

    if config.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "crawler request_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.content_max_chars == 0 {
        return Err(ConfigError::Validation(
            "content_max_chars must be >= 1".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates analyzer configuration
fn validate_analyzer_config(config: &AnalyzerConfig) -> Result<(), ConfigError> {
    if config.batch_size < 1 {
        return Err(ConfigError::Validation(format!(
            "batch_size must be >= 1, got {}",
            config.batch_size
        )));
    }

    if config.model.trim().is_empty() {
        return Err(ConfigError::Validation("model cannot be empty".to_string()));
    }

    if config.max_tokens == 0 {
        return Err(ConfigError::Validation(
            "max_tokens must be >= 1".to_string(),
        ));
    }

    if config.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "analyzer request_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.api_key_env.trim().is_empty() {
        return Err(ConfigError::Validation(
            "api_key_env cannot be empty".to_string(),
        ));
    }

    let base = Url::parse(&config.api_base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid api_base_url: {}", e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "api_base_url must use HTTP or HTTPS, got '{}'",
            config.api_base_url
        )));
    }

    Ok(())
}

/// Validates ETA heuristic constants
fn validate_progress_config(config: &ProgressConfig) -> Result<(), ConfigError> {
    if config.seconds_per_page == 0 || config.seconds_per_batch == 0 {
        return Err(ConfigError::Validation(
            "progress estimates must be >= 1 second".to_string(),
        ));
    }

    Ok(())
}
