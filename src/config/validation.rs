use crate::config::types::{
    Config, ExtractionConfig, FetcherConfig, SearchConfig, ServerConfig, UserAgentConfig,
};
use crate::extract::PatternRule;
use crate::ConfigError;
use scraper::Selector;
use std::collections::HashSet;
use url::Url;

/// Smallest accepted timeout, in milliseconds
const MIN_TIMEOUT_MS: u64 = 100;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_server_config(&config.server)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_search_config(&config.search)?;
    validate_extraction_config(&config.extraction)?;
    Ok(())
}

fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    if config.port == 0 {
        return Err(ConfigError::Validation("port must be non-zero".to_string()));
    }

    if config.host.trim().is_empty() {
        return Err(ConfigError::Validation("host cannot be empty".to_string()));
    }

    validate_timeout("request_timeout_ms", config.request_timeout_ms)
}

fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.value.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user agent cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    validate_timeout("page_timeout_ms", config.page_timeout_ms)?;
    validate_timeout("search_timeout_ms", config.search_timeout_ms)?;

    if config.settle_delay_ms >= config.page_timeout_ms {
        return Err(ConfigError::Validation(format!(
            "settle_delay_ms ({}ms) must be shorter than page_timeout_ms ({}ms)",
            config.settle_delay_ms, config.page_timeout_ms
        )));
    }

    // An empty selector disables the readiness check
    if let Some(selector) = config.ready_selector.as_deref().filter(|s| !s.is_empty()) {
        Selector::parse(selector).map_err(|e| {
            ConfigError::Validation(format!("Invalid ready_selector '{}': {:?}", selector, e))
        })?;
    }

    Ok(())
}

fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid search endpoint: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Search endpoint '{}' must use HTTP or HTTPS",
            config.endpoint
        )));
    }

    if config.marketplaces.is_empty() {
        return Err(ConfigError::Validation(
            "at least one marketplace is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for marketplace in &config.marketplaces {
        if !seen.insert(marketplace) {
            return Err(ConfigError::Validation(format!(
                "marketplace '{}' listed more than once",
                marketplace.site()
            )));
        }
    }

    Ok(())
}

fn validate_extraction_config(config: &ExtractionConfig) -> Result<(), ConfigError> {
    if !config.min_price.is_finite() || !config.max_price.is_finite() {
        return Err(ConfigError::Validation(
            "min_price and max_price must be finite".to_string(),
        ));
    }

    if config.min_price <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "min_price must be positive, got {}",
            config.min_price
        )));
    }

    if config.min_price > config.max_price {
        return Err(ConfigError::Validation(format!(
            "min_price ({}) must not exceed max_price ({})",
            config.min_price, config.max_price
        )));
    }

    for entry in &config.rules {
        PatternRule::custom(&entry.name, &entry.pattern)?;
    }

    Ok(())
}

fn validate_timeout(name: &str, value_ms: u64) -> Result<(), ConfigError> {
    if value_ms < MIN_TIMEOUT_MS {
        return Err(ConfigError::Validation(format!(
            "{} must be >= {}ms, got {}ms",
            name, MIN_TIMEOUT_MS, value_ms
        )));
    }
    Ok(())
}
