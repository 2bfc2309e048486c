//! Crawl coordinator - per-request price lookup orchestration
//!
//! This module ties the pipeline together:
//! - discovering candidate links for a product
//! - fetching every link concurrently and extracting a price from each
//! - isolating per-link failures into observations
//! - aggregating the observations into a report

use crate::config::Config;
use crate::crawler::discover::LinkDiscoverer;
use crate::crawler::fetcher::{FetchAdapter, FetchOptions, HttpFetcher};
use crate::extract::PriceExtractor;
use crate::report::{aggregate, PriceObservation, PriceReport, ProductQuery, ReportStatistics};
use crate::url::CandidateLink;
use crate::ScoutError;
use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Fetches each link and extracts its price, preserving input order
///
/// All links are fetched concurrently; the call returns once every branch has
/// finished. A failed fetch becomes an observation carrying the error and
/// never affects the other links.
pub async fn collect(
    fetcher: &dyn FetchAdapter,
    extractor: &PriceExtractor,
    links: &[CandidateLink],
    options: &FetchOptions,
) -> Vec<PriceObservation> {
    let branches = links.iter().map(|link| async move {
        match fetcher.fetch(link.as_str(), options).await {
            Ok(content) => {
                let price = extractor.extract(&content.combined_text());
                tracing::debug!("Price for {}: {:?}", link, price);
                PriceObservation::priced(link.as_str(), price)
            }
            Err(e) => {
                tracing::warn!("Error crawling {}: {}", link, e);
                PriceObservation::failed(link.as_str(), e.to_string())
            }
        }
    });

    join_all(branches).await
}

/// Runs complete best-price lookups
///
/// Holds only read-only state; concurrent lookups share nothing mutable.
pub struct PriceCrawler {
    fetcher: Arc<dyn FetchAdapter>,
    discoverer: LinkDiscoverer,
    extractor: PriceExtractor,
    page_options: FetchOptions,
    request_timeout: Duration,
}

impl PriceCrawler {
    /// Creates a crawler backed by [`HttpFetcher`]
    pub fn new(config: &Config) -> Result<Self, ScoutError> {
        let fetcher: Arc<dyn FetchAdapter> = Arc::new(HttpFetcher::new(&config.user_agent));
        Self::with_fetcher(config, fetcher)
    }

    /// Creates a crawler around any fetch adapter
    pub fn with_fetcher(
        config: &Config,
        fetcher: Arc<dyn FetchAdapter>,
    ) -> Result<Self, ScoutError> {
        let extractor = PriceExtractor::from_config(&config.extraction)?;
        let discoverer = LinkDiscoverer::new(fetcher.clone(), &config.search, &config.fetcher);

        Ok(Self {
            fetcher,
            discoverer,
            extractor,
            page_options: FetchOptions::page(&config.fetcher),
            request_timeout: Duration::from_millis(config.server.request_timeout_ms),
        })
    }

    pub fn extractor(&self) -> &PriceExtractor {
        &self.extractor
    }

    /// Looks up the best price for a product
    ///
    /// # Returns
    ///
    /// * `Ok(PriceReport)` - every candidate link was attempted
    /// * `Err(ScoutError::NoLinks)` - discovery found nothing to crawl
    /// * `Err(ScoutError::RequestTimeout)` - the whole lookup overran its deadline
    pub async fn best_price(&self, product: &ProductQuery) -> Result<PriceReport, ScoutError> {
        let timeout_ms = self.request_timeout.as_millis() as u64;

        tokio::time::timeout(self.request_timeout, self.lookup(product))
            .await
            .map_err(|_| ScoutError::RequestTimeout { timeout_ms })?
    }

    async fn lookup(&self, product: &ProductQuery) -> Result<PriceReport, ScoutError> {
        let start = Instant::now();

        let links = self.discoverer.discover(product).await;
        if links.is_empty() {
            return Err(ScoutError::NoLinks);
        }

        tracing::info!("Crawling {} links for prices...", links.len());
        let observations =
            collect(self.fetcher.as_ref(), &self.extractor, &links, &self.page_options).await;

        let report = aggregate(product, observations, links.len());
        let stats = ReportStatistics::from_report(&report);
        tracing::info!(
            product = %report.product,
            priced = stats.priced,
            failed = stats.failed,
            hit_rate = stats.hit_rate(),
            best = ?report.best.as_ref().and_then(|b| b.price),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Lookup complete"
        );

        Ok(report)
    }
}
