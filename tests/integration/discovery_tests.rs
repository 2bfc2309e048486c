//! Discovery over real HTTP against a wiremock search provider

use crate::support::{results_page, AMAZON_LINK, EBAY_LINK, FLIPKART_LINK};
use price_scout::config::{Config, UserAgentConfig};
use price_scout::crawler::{HttpFetcher, LinkDiscoverer, MAX_CANDIDATE_LINKS};
use price_scout::report::ProductQuery;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn discoverer_for(server: &MockServer) -> LinkDiscoverer {
    let mut config = Config::default();
    config.search.endpoint = format!("{}/search?q=", server.uri());

    let fetcher = Arc::new(HttpFetcher::new(&UserAgentConfig::default()));
    LinkDiscoverer::new(fetcher, &config.search, &config.fetcher)
}

#[tokio::test]
async fn test_discovery_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param(
            "q",
            "iphone 13 price site:amazon.in OR site:flipkart.com OR site:ebay.com",
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(results_page())
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let discoverer = discoverer_for(&server);
    let links = discoverer
        .discover(&ProductQuery::new("iphone 13").unwrap())
        .await;

    let urls: Vec<_> = links.iter().map(|l| l.as_str()).collect();
    assert_eq!(urls, vec![AMAZON_LINK, FLIPKART_LINK, EBAY_LINK]);
}

#[tokio::test]
async fn test_discovery_caps_and_dedups() {
    let server = MockServer::start().await;

    let mut page = String::from("<html><body>");
    for i in 0..10 {
        let href = format!("https://www.ebay.com/itm/{}", 300000000 + i % 5);
        page.push_str(&format!("<a href=\"{0}\">{0}</a>", href));
    }
    page.push_str("</body></html>");

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&server)
        .await;

    let links = discoverer_for(&server)
        .discover(&ProductQuery::new("pixel 8").unwrap())
        .await;

    assert_eq!(links.len(), MAX_CANDIDATE_LINKS);
    assert_eq!(links[0].as_str(), "https://www.ebay.com/itm/300000000");
    assert_eq!(links[1].as_str(), "https://www.ebay.com/itm/300000001");
    assert_eq!(links[2].as_str(), "https://www.ebay.com/itm/300000002");
}

#[tokio::test]
async fn test_discovery_search_failure_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let links = discoverer_for(&server)
        .discover(&ProductQuery::new("iphone 13").unwrap())
        .await;

    assert!(links.is_empty());
}
