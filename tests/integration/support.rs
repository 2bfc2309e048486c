//! Shared test doubles

use async_trait::async_trait;
use price_scout::config::Config;
use price_scout::crawler::{FetchAdapter, FetchOptions, PageContent};
use price_scout::{FetchError, FetchResult};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

pub const SEARCH_ENDPOINT: &str = "https://search.test/?q=";

pub const AMAZON_LINK: &str = "https://www.amazon.in/Apple-iPhone-13-128GB/dp/B09G9HD6PD";
pub const FLIPKART_LINK: &str = "https://www.flipkart.com/apple-iphone-13/p/itmca361aab1c5b0";
pub const EBAY_LINK: &str = "https://www.ebay.com/itm/204296934581";

/// A search results page linking to one listing per marketplace, in
/// reverse allow-list order
pub fn results_page() -> String {
    format!(
        r#"<html><body>
        <a href="/url?q={}&amp;sa=U">eBay</a>
        <a href="{}">Flipkart</a>
        <a href='{}'>Amazon</a>
        </body></html>"#,
        EBAY_LINK, FLIPKART_LINK, AMAZON_LINK
    )
}

/// Configuration pointing at the in-memory search endpoint
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.search.endpoint = SEARCH_ENDPOINT.to_string();
    config.fetcher.settle_delay_ms = 0;
    config
}

/// What the static fetcher returns for a URL
#[derive(Clone)]
pub enum Page {
    Html(String),
    Fail,
    Slow(Duration),
}

/// In-memory fetch adapter: search URLs get the search page, other URLs are
/// looked up exactly
pub struct StaticFetcher {
    search: Option<String>,
    pages: HashMap<String, Page>,
    pub requested: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new(search: Option<String>) -> Self {
        Self {
            search,
            pages: HashMap::new(),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn with_page(mut self, url: &str, page: Page) -> Self {
        self.pages.insert(url.to_string(), page);
        self
    }
}

#[async_trait]
impl FetchAdapter for StaticFetcher {
    async fn fetch(&self, url: &str, _options: &FetchOptions) -> FetchResult<PageContent> {
        self.requested.lock().unwrap().push(url.to_string());

        let page = if url.starts_with(SEARCH_ENDPOINT) {
            self.search.clone().map(Page::Html).unwrap_or(Page::Fail)
        } else {
            self.pages.get(url).cloned().unwrap_or(Page::Fail)
        };

        match page {
            Page::Html(html) => Ok(PageContent {
                final_url: url.to_string(),
                status_code: 200,
                html,
                text: String::new(),
            }),
            Page::Fail => Err(FetchError::Status {
                url: url.to_string(),
                status_code: 503,
            }),
            Page::Slow(delay) => {
                tokio::time::sleep(delay).await;
                Err(FetchError::Timeout {
                    url: url.to_string(),
                    timeout_ms: delay.as_millis() as u64,
                })
            }
        }
    }
}
