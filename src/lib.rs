//! Price-Scout: a best-price finder for retail marketplaces
//!
//! This crate discovers product listing pages for a free-text query, fetches
//! each page concurrently, extracts a price from the raw page text and reports
//! the cheapest observation alongside every per-page result.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod report;
pub mod server;
pub mod url;

use thiserror::Error;

/// Main error type for Price-Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("No product name provided")]
    EmptyProduct,

    #[error("No product links found")]
    NoLinks,

    #[error("Request exceeded {timeout_ms}ms deadline")]
    RequestTimeout { timeout_ms: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid pattern rule: {0}")]
    InvalidPattern(String),
}

/// Errors raised while fetching a single page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url} after {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u64 },

    #[error("HTTP {status_code} for {url}")]
    Status { url: String, status_code: u16 },

    #[error("Page {url} never rendered '{selector}'")]
    NotReady { url: String, selector: String },

    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Unsupported marketplace: {0}")]
    UnknownMarketplace(String),

    #[error("URL too short to be a listing: {0}")]
    TooShort(String),

    #[error("Not a product detail page: {0}")]
    NotProductPage(String),
}

/// Result type alias for Price-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::crawler::{FetchAdapter, FetchOptions, HttpFetcher, PageContent, PriceCrawler};
pub use crate::extract::{PriceBounds, PriceExtractor};
pub use crate::report::{aggregate, PriceObservation, PriceReport, ProductQuery};
pub use crate::url::{CandidateLink, Marketplace};
