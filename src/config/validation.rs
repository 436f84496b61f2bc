use crate::config::types::{Config, FetcherConfig, RateLimitConfig, ScraperConfig, ServerConfig};
use crate::ConfigError;
use scraper::Selector;
use std::net::SocketAddr;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_config(&config.scraper)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_rate_limit_config(&config.rate_limit)?;
    validate_server_config(&config.server)?;
    Ok(())
}

/// Validates scrape orchestration configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.seed_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed-url '{}': {}", config.seed_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "seed-url '{}' must use http or https",
            config.seed_url
        )));
    }

    Selector::parse(&config.link_selector)
        .map_err(|e| ConfigError::InvalidSelector(format!("'{}': {:?}", config.link_selector, e)))?;

    if config.max_workers < 1 || config.max_workers > 256 {
        return Err(ConfigError::Validation(format!(
            "max-workers must be between 1 and 256, got {}",
            config.max_workers
        )));
    }

    Ok(())
}

/// Validates outbound HTTP configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.max_attempts < 1 || config.max_attempts > 10 {
        return Err(ConfigError::Validation(format!(
            "max-attempts must be between 1 and 10, got {}",
            config.max_attempts
        )));
    }

    Ok(())
}

/// Validates the global rate ceiling
fn validate_rate_limit_config(config: &RateLimitConfig) -> Result<(), ConfigError> {
    if config.max_calls < 1 {
        return Err(ConfigError::Validation(format!(
            "max-calls must be >= 1, got {}",
            config.max_calls
        )));
    }

    if config.period_ms < 1 {
        return Err(ConfigError::Validation(
            "period-ms must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates HTTP API configuration
fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    config.bind_address.parse::<SocketAddr>().map_err(|e| {
        ConfigError::Validation(format!(
            "Invalid bind-address '{}': {}",
            config.bind_address, e
        ))
    })?;
    Ok(())
}
