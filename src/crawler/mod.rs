//! Crawler module for price lookups
//!
//! This module contains the core lookup pipeline, including:
//! - Page fetching behind the `FetchAdapter` seam
//! - HTML cleaning and text digests
//! - Candidate link discovery through a search provider
//! - Concurrent per-link price collection

mod coordinator;
mod discover;
mod fetcher;
mod parser;

pub use coordinator::{collect, PriceCrawler};
pub use discover::{LinkDiscoverer, MAX_CANDIDATE_LINKS};
pub use fetcher::{FetchAdapter, FetchOptions, HttpFetcher, PageContent};
pub use parser::{parse_page, ParsedPage};

use crate::config::Config;
use crate::report::{PriceReport, ProductQuery};
use crate::ScoutError;

/// Runs a single best-price lookup with a fresh [`PriceCrawler`]
///
/// # Example
///
/// ```no_run
/// use price_scout::config::Config;
/// use price_scout::crawler::find_best_price;
///
/// # async fn example() -> Result<(), price_scout::ScoutError> {
/// let report = find_best_price(&Config::default(), "iphone 13").await?;
/// println!("{:?}", report.best);
/// # Ok(())
/// # }
/// ```
pub async fn find_best_price(config: &Config, product: &str) -> Result<PriceReport, ScoutError> {
    let query = ProductQuery::new(product)?;
    let crawler = PriceCrawler::new(config)?;
    crawler.best_price(&query).await
}
