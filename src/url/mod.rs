//! URL handling module for Price-Scout
//!
//! This module provides the marketplace allow-list, link sanitization and
//! validation of candidate product links.

mod marketplace;
mod sanitize;

pub use marketplace::Marketplace;
pub use sanitize::sanitize_link;

use crate::{UrlError, UrlResult};
use serde::Serialize;
use std::fmt;
use url::Url;

/// Links this short or shorter are truncated or garbage matches
pub const MIN_LINK_LENGTH: usize = 30;

/// A validated product-detail link on a supported marketplace
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CandidateLink {
    url: String,
    #[serde(skip)]
    marketplace: Marketplace,
}

impl CandidateLink {
    /// Validates a sanitized link and tags it with its marketplace
    ///
    /// A link is accepted when:
    /// 1. it starts with `http://` or `https://`
    /// 2. it is longer than [`MIN_LINK_LENGTH`] characters
    /// 3. its host belongs to a supported marketplace
    /// 4. it carries that marketplace's product-detail path token
    ///
    /// The link text itself is kept verbatim.
    ///
    /// # Examples
    ///
    /// ```
    /// use price_scout::url::{CandidateLink, Marketplace};
    ///
    /// let link = CandidateLink::parse("https://www.amazon.in/Apple-iPhone-13/dp/B09G9HD6PD").unwrap();
    /// assert_eq!(link.marketplace(), Marketplace::Amazon);
    ///
    /// assert!(CandidateLink::parse("https://www.amazon.in/s?k=iphone+13+phone").is_err());
    /// ```
    pub fn parse(link: &str) -> UrlResult<Self> {
        if !(link.starts_with("http://") || link.starts_with("https://")) {
            return Err(UrlError::InvalidScheme(link.to_string()));
        }

        if link.chars().count() <= MIN_LINK_LENGTH {
            return Err(UrlError::TooShort(link.to_string()));
        }

        let parsed = Url::parse(link).map_err(|e| UrlError::Parse(format!("{}: {}", link, e)))?;
        let marketplace = Marketplace::from_url(&parsed)
            .ok_or_else(|| UrlError::UnknownMarketplace(link.to_string()))?;

        if !link.contains(marketplace.product_token()) {
            return Err(UrlError::NotProductPage(link.to_string()));
        }

        Ok(Self {
            url: link.to_string(),
            marketplace,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn marketplace(&self) -> Marketplace {
        self.marketplace
    }
}

impl fmt::Display for CandidateLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
