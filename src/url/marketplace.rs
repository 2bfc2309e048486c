use serde::Deserialize;
use url::Url;

/// Supported retail marketplaces, in allow-list order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marketplace {
    Amazon,
    Flipkart,
    Ebay,
}

impl Marketplace {
    /// The full allow-list
    pub const ALL: [Marketplace; 3] = [Self::Amazon, Self::Flipkart, Self::Ebay];

    /// Domain used in `site:` search restrictions
    pub fn site(&self) -> &'static str {
        match self {
            Self::Amazon => "amazon.in",
            Self::Flipkart => "flipkart.com",
            Self::Ebay => "ebay.com",
        }
    }

    /// Host that product pages are served from
    pub fn host(&self) -> &'static str {
        match self {
            Self::Amazon => "www.amazon.in",
            Self::Flipkart => "www.flipkart.com",
            Self::Ebay => "www.ebay.com",
        }
    }

    /// Shape of an embedded product-page link, anchored at the canonical
    /// product path segment
    pub fn link_pattern(&self) -> &'static str {
        match self {
            Self::Amazon => r#"https://www\.amazon\.in/[^/]+/dp/[A-Z0-9]+[^\s<>"']*"#,
            Self::Flipkart => r#"https://www\.flipkart\.com/[^/]+/p/[a-z0-9]+[^\s<>"']*"#,
            Self::Ebay => r#"https://www\.ebay\.com/itm/[^\s<>"']*"#,
        }
    }

    /// Path token present only on product detail pages
    pub fn product_token(&self) -> &'static str {
        match self {
            Self::Amazon => "dp/",
            Self::Flipkart => "/p/",
            Self::Ebay => "itm/",
        }
    }

    /// Infers the marketplace from a URL's host
    ///
    /// ```
    /// use price_scout::url::Marketplace;
    /// use url::Url;
    ///
    /// let url = Url::parse("https://www.flipkart.com/x/p/itm123").unwrap();
    /// assert_eq!(Marketplace::from_url(&url), Some(Marketplace::Flipkart));
    /// ```
    pub fn from_url(url: &Url) -> Option<Self> {
        let host = url.host_str()?.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| host == m.host() || host == m.site())
    }
}
