//! HTTP-level tests for `POST /best-price` via `tower::ServiceExt::oneshot`

use crate::support::{
    results_page, test_config, Page, StaticFetcher, AMAZON_LINK, EBAY_LINK, FLIPKART_LINK,
};
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use price_scout::crawler::PriceCrawler;
use price_scout::server::{router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt as _;

const BODY_LIMIT: usize = 1024 * 1024;

fn app_with(fetcher: StaticFetcher) -> Router {
    let crawler = PriceCrawler::with_fetcher(&test_config(), Arc::new(fetcher))
        .expect("build crawler");
    router(AppState::new(crawler))
}

async fn post_json(app: Router, body: String) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri("/best-price")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .expect("build POST /best-price");

    let resp = app.oneshot(req).await.expect("oneshot /best-price");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    let value = serde_json::from_slice(&bytes).expect("parse json");
    (status, value)
}

/// Listing pages priced [25999, none, 24999] in allow-list order
fn priced_fetcher() -> StaticFetcher {
    StaticFetcher::new(Some(results_page()))
        .with_page(
            AMAZON_LINK,
            Page::Html(r#"<span class="a-price-whole">25,999</span>"#.to_string()),
        )
        .with_page(
            FLIPKART_LINK,
            Page::Html("<div>Currently unavailable</div>".to_string()),
        )
        .with_page(
            EBAY_LINK,
            Page::Html(r#"{"price": "₹24,999"} Call 1800-200-3000"#.to_string()),
        )
}

#[tokio::test]
async fn health_returns_ok() {
    let app = app_with(StaticFetcher::new(None));
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn empty_product_is_400() {
    let fetcher = Arc::new(StaticFetcher::new(Some(results_page())));
    let crawler = PriceCrawler::with_fetcher(&test_config(), fetcher.clone()).unwrap();
    let app = router(AppState::new(crawler));

    let (status, body) = post_json(app, json!({ "product": "" }).to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No product name provided" }));
    // rejected before any work begins
    assert!(fetcher.requested.lock().unwrap().is_empty());
}

#[tokio::test]
async fn blank_missing_or_malformed_product_is_400() {
    for payload in [
        json!({ "product": "   " }).to_string(),
        json!({}).to_string(),
        json!({ "product": 42 }).to_string(),
        "not json".to_string(),
    ] {
        let app = app_with(StaticFetcher::new(Some(results_page())));
        let (status, body) = post_json(app, payload.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {}", payload);
        assert_eq!(body["error"], "No product name provided");
    }
}

#[tokio::test]
async fn no_links_is_404() {
    let app = app_with(StaticFetcher::new(Some(
        "<html><body>No results found</body></html>".to_string(),
    )));

    let (status, body) = post_json(app, json!({ "product": "iphone 13" }).to_string()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "No product links found" }));
}

#[tokio::test]
async fn failed_search_is_404() {
    let app = app_with(StaticFetcher::new(None));
    let (status, _) = post_json(app, json!({ "product": "iphone 13" }).to_string()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn best_price_picks_cheapest_listing() {
    let app = app_with(priced_fetcher());

    let (status, body) =
        post_json(app, json!({ "product": "  iphone 13 " }).to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["product"], "iphone 13");
    assert_eq!(body["found_links"], 3);
    assert_eq!(body["best"]["url"], EBAY_LINK);
    assert_eq!(body["best"]["price"], 24999.0);

    let all = body["all"].as_array().expect("all array");
    assert_eq!(all.len(), 3);
    assert_eq!(all[0], json!({ "url": AMAZON_LINK, "price": 25999.0 }));
    assert_eq!(all[1], json!({ "url": FLIPKART_LINK, "price": null }));
    assert_eq!(all[2], json!({ "url": EBAY_LINK, "price": 24999.0 }));
}

#[tokio::test]
async fn failed_listing_reports_error_without_aborting() {
    let fetcher = StaticFetcher::new(Some(results_page()))
        .with_page(AMAZON_LINK, Page::Html("₹31,000".to_string()))
        .with_page(FLIPKART_LINK, Page::Fail)
        .with_page(EBAY_LINK, Page::Html("no price".to_string()));
    let app = app_with(fetcher);

    let (status, body) = post_json(app, json!({ "product": "iphone 13" }).to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["best"]["url"], AMAZON_LINK);

    let all = body["all"].as_array().unwrap();
    assert!(all[0].get("error").is_none());
    assert!(all[1]["price"].is_null());
    assert!(all[1]["error"].as_str().unwrap().contains("503"));
    assert!(all[2].get("error").is_none());
}

#[tokio::test]
async fn all_unpriced_has_null_best() {
    let fetcher = StaticFetcher::new(Some(results_page()))
        .with_page(AMAZON_LINK, Page::Fail)
        .with_page(FLIPKART_LINK, Page::Html("₹12".to_string()))
        .with_page(EBAY_LINK, Page::Fail);
    let app = app_with(fetcher);

    let (status, body) = post_json(app, json!({ "product": "iphone 13" }).to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["best"].is_null());
    assert_eq!(body["found_links"], 3);
}

#[tokio::test]
async fn request_deadline_is_500() {
    let mut config = test_config();
    config.server.request_timeout_ms = 100;

    let fetcher = StaticFetcher::new(Some(results_page()))
        .with_page(AMAZON_LINK, Page::Slow(Duration::from_secs(2)));
    let crawler = PriceCrawler::with_fetcher(&config, Arc::new(fetcher)).unwrap();
    let app = router(AppState::new(crawler));

    let (status, body) = post_json(app, json!({ "product": "iphone 13" }).to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Server error: "));
}
