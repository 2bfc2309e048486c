//! Page fetching
//!
//! This module defines the boundary to whatever retrieves page content:
//! - the [`FetchAdapter`] trait the discoverer and orchestrator depend on
//! - [`HttpFetcher`], the reqwest-backed implementation
//!
//! Every fetch runs in its own transient HTTP session so that cookies and
//! connection state never leak between links or between requests.

use crate::config::{FetcherConfig, UserAgentConfig};
use crate::crawler::parser::parse_page;
use crate::{FetchError, FetchResult};
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Maximum redirect hops followed for one fetch
const MAX_REDIRECTS: usize = 10;

/// Textual content of a fetched page
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    /// Final URL after redirects
    pub final_url: String,

    /// HTTP status code
    pub status_code: u16,

    /// Cleaned markup
    pub html: String,

    /// Visible text digest
    pub text: String,
}

impl PageContent {
    /// Both textual views joined, as read by the price extractor
    pub fn combined_text(&self) -> String {
        format!("{} {}", self.html, self.text)
    }
}

/// Per-fetch wait policy
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Hard deadline for the whole fetch, settle delay included
    pub timeout: Duration,

    /// Pause after the response arrives, to let late content settle
    pub settle_delay: Duration,

    /// Selector that must match a non-empty element for the page to count
    pub ready_selector: Option<String>,
}

impl FetchOptions {
    /// Options for a listing page
    pub fn page(config: &FetcherConfig) -> Self {
        Self {
            timeout: Duration::from_millis(config.page_timeout_ms),
            settle_delay: Duration::from_millis(config.settle_delay_ms),
            ready_selector: config.ready_selector.clone().filter(|s| !s.is_empty()),
        }
    }

    /// Options for the search results page: no settle delay, no readiness check
    pub fn search(config: &FetcherConfig) -> Self {
        Self {
            timeout: Duration::from_millis(config.search_timeout_ms),
            settle_delay: Duration::ZERO,
            ready_selector: None,
        }
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::page(&FetcherConfig::default())
    }
}

/// Retrieves the textual content of a URL
#[async_trait]
pub trait FetchAdapter: Send + Sync {
    /// Fetches `url`, honouring the deadline and readiness policy in `options`
    async fn fetch(&self, url: &str, options: &FetchOptions) -> FetchResult<PageContent>;
}

/// Fetch adapter backed by reqwest and scraper
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    user_agent: String,
}

impl HttpFetcher {
    pub fn new(config: &UserAgentConfig) -> Self {
        Self {
            user_agent: config.value.clone(),
        }
    }

    /// Builds the transient client used for a single fetch
    ///
    /// # Example
    ///
    /// ```
    /// use price_scout::config::UserAgentConfig;
    /// use price_scout::crawler::HttpFetcher;
    /// use std::time::Duration;
    ///
    /// let fetcher = HttpFetcher::new(&UserAgentConfig::default());
    /// let client = fetcher.session(Duration::from_secs(5)).unwrap();
    /// ```
    pub fn session(&self, timeout: Duration) -> Result<Client, reqwest::Error> {
        Client::builder()
            .user_agent(&self.user_agent)
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .redirect(Policy::limited(MAX_REDIRECTS))
            .gzip(true)
            .brotli(true)
            .build()
    }

    async fn fetch_inner(&self, url: &str, options: &FetchOptions) -> FetchResult<PageContent> {
        let client = self
            .session(options.timeout)
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, options, e))?;

        let status = response.status();
        let final_url = response.url().to_string();

        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status_code: status.as_u16(),
            });
        }

        if !options.settle_delay.is_zero() {
            tokio::time::sleep(options.settle_delay).await;
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify_error(url, options, e))?;

        let parsed = parse_page(&body, options.ready_selector.as_deref());
        if !parsed.ready {
            return Err(FetchError::NotReady {
                url: url.to_string(),
                selector: options.ready_selector.clone().unwrap_or_default(),
            });
        }

        Ok(PageContent {
            final_url,
            status_code: status.as_u16(),
            html: parsed.html,
            text: parsed.text,
        })
    }
}

#[async_trait]
impl FetchAdapter for HttpFetcher {
    async fn fetch(&self, url: &str, options: &FetchOptions) -> FetchResult<PageContent> {
        if let Err(e) = url::Url::parse(url) {
            return Err(FetchError::InvalidUrl {
                url: url.to_string(),
                message: e.to_string(),
            });
        }

        tracing::debug!("Fetching {}", url);

        match tokio::time::timeout(options.timeout, self.fetch_inner(url, options)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout {
                url: url.to_string(),
                timeout_ms: options.timeout.as_millis() as u64,
            }),
        }
    }
}

/// Maps a reqwest error onto the fetch error taxonomy
fn classify_error(url: &str, options: &FetchOptions, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
            timeout_ms: options.timeout.as_millis() as u64,
        }
    } else {
        FetchError::Http {
            url: url.to_string(),
            source: e,
        }
    }
}
