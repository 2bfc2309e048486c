use crate::url::Marketplace;
use serde::Deserialize;

/// Main configuration structure for Price-Scout
///
/// Every section is optional; a missing section falls back to its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Listening port (overridden by `PORT` or `--port`)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Deadline for a whole lookup, discovery and crawl included (milliseconds)
    #[serde(default = "default_request_timeout", rename = "request-timeout-ms")]
    pub request_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

/// User agent sent with every fetch
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    #[serde(default = "default_user_agent")]
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: default_user_agent(),
        }
    }
}

/// Page fetch behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// Hard deadline for one listing page (milliseconds)
    #[serde(default = "default_page_timeout", rename = "page-timeout-ms")]
    pub page_timeout_ms: u64,

    /// Wait after the page responds, to let late content settle (milliseconds)
    #[serde(default = "default_settle_delay", rename = "settle-delay-ms")]
    pub settle_delay_ms: u64,

    /// CSS selector that must be present before a page counts as rendered
    #[serde(default = "default_ready_selector", rename = "ready-selector")]
    pub ready_selector: Option<String>,

    /// Hard deadline for the search results page (milliseconds)
    #[serde(default = "default_search_timeout", rename = "search-timeout-ms")]
    pub search_timeout_ms: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            page_timeout_ms: default_page_timeout(),
            settle_delay_ms: default_settle_delay(),
            ready_selector: default_ready_selector(),
            search_timeout_ms: default_search_timeout(),
        }
    }
}

/// Search provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Endpoint the escaped query string is appended to
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Marketplaces to restrict the search to; listing order is ignored
    #[serde(default = "default_marketplaces")]
    pub marketplaces: Vec<Marketplace>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            marketplaces: default_marketplaces(),
        }
    }
}

impl SearchConfig {
    /// Configured marketplaces in allow-list order
    pub fn active_marketplaces(&self) -> Vec<Marketplace> {
        Marketplace::ALL
            .into_iter()
            .filter(|m| self.marketplaces.contains(m))
            .collect()
    }
}

/// Price extraction tuning
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    /// Lowest plausible price (inclusive)
    #[serde(default = "default_min_price", rename = "min-price")]
    pub min_price: f64,

    /// Highest plausible price (inclusive)
    #[serde(default = "default_max_price", rename = "max-price")]
    pub max_price: f64,

    /// Extra pattern rules applied after the built-in ones
    #[serde(default)]
    pub rules: Vec<RuleEntry>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_price: default_min_price(),
            max_price: default_max_price(),
            rules: Vec::new(),
        }
    }
}

/// A user-supplied pattern rule; the first capture group is the price
#[derive(Debug, Clone, Deserialize)]
pub struct RuleEntry {
    pub name: String,
    pub pattern: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_request_timeout() -> u64 {
    120_000
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string()
}

fn default_page_timeout() -> u64 {
    15_000
}

fn default_settle_delay() -> u64 {
    2_000
}

fn default_ready_selector() -> Option<String> {
    Some("body".to_string())
}

fn default_search_timeout() -> u64 {
    15_000
}

fn default_endpoint() -> String {
    "https://www.google.com/search?q=".to_string()
}

fn default_marketplaces() -> Vec<Marketplace> {
    Marketplace::ALL.to_vec()
}

fn default_min_price() -> f64 {
    1000.0
}

fn default_max_price() -> f64 {
    200_000.0
}
