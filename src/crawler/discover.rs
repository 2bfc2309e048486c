//! Candidate link discovery
//!
//! A single search results page is fetched for the product, restricted to
//! the configured marketplaces. Product-page links embedded in that page are
//! sanitized, validated, deduplicated and capped.

use crate::config::{FetcherConfig, SearchConfig};
use crate::crawler::fetcher::{FetchAdapter, FetchOptions};
use crate::report::ProductQuery;
use crate::url::{sanitize_link, CandidateLink, Marketplace};
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;
use url::form_urlencoded;

/// Maximum number of links handed to the crawl stage
pub const MAX_CANDIDATE_LINKS: usize = 3;

/// Finds candidate listing pages through a search provider
pub struct LinkDiscoverer {
    fetcher: Arc<dyn FetchAdapter>,
    endpoint: String,
    options: FetchOptions,
    patterns: Vec<(Marketplace, Regex)>,
}

impl LinkDiscoverer {
    /// Creates a discoverer for the configured marketplaces
    pub fn new(
        fetcher: Arc<dyn FetchAdapter>,
        search: &SearchConfig,
        fetcher_config: &FetcherConfig,
    ) -> Self {
        let patterns = search
            .active_marketplaces()
            .into_iter()
            .filter_map(|m| match Regex::new(m.link_pattern()) {
                Ok(re) => Some((m, re)),
                Err(e) => {
                    tracing::error!("Invalid link pattern for {}: {}", m.site(), e);
                    None
                }
            })
            .collect();

        Self {
            fetcher,
            endpoint: search.endpoint.clone(),
            options: FetchOptions::search(fetcher_config),
            patterns,
        }
    }

    /// Builds the site-restricted query text
    ///
    /// # Example
    ///
    /// `iphone 13 price site:amazon.in OR site:flipkart.com OR site:ebay.com`
    pub fn search_query(&self, product: &ProductQuery) -> String {
        let sites = self
            .patterns
            .iter()
            .map(|(m, _)| format!("site:{}", m.site()))
            .collect::<Vec<_>>()
            .join(" OR ");
        format!("{} price {}", product.as_str(), sites)
    }

    /// Full search URL: endpoint followed by the escaped query
    pub fn search_url(&self, product: &ProductQuery) -> String {
        let query = self.search_query(product);
        let escaped: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
        format!("{}{}", self.endpoint, escaped)
    }

    /// Discovers up to [`MAX_CANDIDATE_LINKS`] product links
    ///
    /// A failed search fetch yields an empty list rather than an error.
    pub async fn discover(&self, product: &ProductQuery) -> Vec<CandidateLink> {
        let search_url = self.search_url(product);
        tracing::debug!("Searching: {}", search_url);

        let content = match self.fetcher.fetch(&search_url, &self.options).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Error searching for links: {}", e);
                return Vec::new();
            }
        };

        let haystack = if content.html.trim().is_empty() {
            &content.text
        } else {
            &content.html
        };

        let links = self.extract_links(haystack);
        tracing::info!(
            "Found {} valid product links: {:?}",
            links.len(),
            links.iter().map(CandidateLink::as_str).collect::<Vec<_>>()
        );
        links
    }

    /// Extracts, sanitizes, validates and deduplicates embedded links
    pub fn extract_links(&self, content: &str) -> Vec<CandidateLink> {
        let mut seen = HashSet::new();
        let mut links = Vec::new();

        let raw_matches = self
            .patterns
            .iter()
            .flat_map(|(_, re)| re.find_iter(content).map(|m| m.as_str()));

        for raw in raw_matches {
            let cleaned = sanitize_link(raw);

            let link = match CandidateLink::parse(cleaned) {
                Ok(link) => link,
                Err(e) => {
                    tracing::trace!("Rejected link: {}", e);
                    continue;
                }
            };

            if seen.insert(link.as_str().to_string()) {
                links.push(link);
                if links.len() == MAX_CANDIDATE_LINKS {
                    break;
                }
            }
        }

        links
    }
}
