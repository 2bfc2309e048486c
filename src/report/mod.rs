//! Lookup results and their aggregation
//!
//! This module handles:
//! - The validated product query
//! - Per-link price observations and the final report
//! - Picking the cheapest observation
//! - Summary statistics and markdown rendering of a report

mod markdown;
pub mod stats;

pub use markdown::{format_markdown_report, write_markdown_report};
pub use stats::ReportStatistics;

use crate::ScoutError;
use serde::Serialize;
use std::fmt;

/// A trimmed, non-empty product name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery(String);

impl ProductQuery {
    /// Trims the input; blank input is rejected
    ///
    /// ```
    /// use price_scout::report::ProductQuery;
    ///
    /// assert_eq!(ProductQuery::new("  iphone 13 ").unwrap().as_str(), "iphone 13");
    /// assert!(ProductQuery::new(" \t").is_err());
    /// ```
    pub fn new(raw: &str) -> Result<Self, ScoutError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ScoutError::EmptyProduct);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of fetching and reading one link
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceObservation {
    pub url: String,
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PriceObservation {
    /// A page that was read, with or without a detectable price
    pub fn priced(url: &str, price: Option<f64>) -> Self {
        Self {
            url: url.to_string(),
            price,
            error: None,
        }
    }

    /// A page that could not be read
    pub fn failed(url: &str, error: String) -> Self {
        Self {
            url: url.to_string(),
            price: None,
            error: Some(error),
        }
    }
}

/// Response payload of a lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceReport {
    pub product: String,
    pub best: Option<PriceObservation>,
    pub all: Vec<PriceObservation>,
    pub found_links: usize,
}

/// Packages observations into a report
///
/// `best` is the observation with the lowest price; on equal prices the
/// earliest one wins. `all` keeps the input order.
pub fn aggregate(
    product: &ProductQuery,
    observations: Vec<PriceObservation>,
    found_links: usize,
) -> PriceReport {
    let mut best: Option<&PriceObservation> = None;

    for observation in &observations {
        let Some(price) = observation.price else {
            continue;
        };

        if best.and_then(|b| b.price).map_or(true, |current| price < current) {
            best = Some(observation);
        }
    }

    PriceReport {
        product: product.as_str().to_string(),
        best: best.cloned(),
        all: observations,
        found_links,
    }
}
