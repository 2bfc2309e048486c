//! HTTP front door
//!
//! Routes:
//! - `POST /best-price` - runs a lookup for `{ "product": "..." }`
//! - `GET /health` - liveness probe

use crate::crawler::PriceCrawler;
use crate::report::{PriceReport, ProductQuery};
use crate::ScoutError;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared, read-only server state
#[derive(Clone)]
pub struct AppState {
    crawler: Arc<PriceCrawler>,
}

impl AppState {
    pub fn new(crawler: PriceCrawler) -> Self {
        Self {
            crawler: Arc::new(crawler),
        }
    }
}

/// Builds the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/best-price", post(best_price))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Binds `addr` and serves until the process is stopped
pub async fn serve(state: AppState, addr: &str) -> Result<(), ScoutError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct BestPriceRequest {
    #[serde(default)]
    product: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Error response for a failed lookup
pub struct ApiError(ScoutError);

impl From<ScoutError> for ApiError {
    fn from(e: ScoutError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            ScoutError::EmptyProduct => (StatusCode::BAD_REQUEST, self.0.to_string()),
            ScoutError::NoLinks => (StatusCode::NOT_FOUND, self.0.to_string()),
            other => {
                tracing::error!("Lookup failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Server error: {}", other),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

async fn best_price(
    State(state): State<AppState>,
    body: Result<Json<BestPriceRequest>, JsonRejection>,
) -> Result<Json<PriceReport>, ApiError> {
    // A malformed body is treated like a missing product name
    let product = match body {
        Ok(Json(req)) => req.product.unwrap_or_default(),
        Err(rejection) => {
            tracing::debug!("Rejected request body: {}", rejection);
            String::new()
        }
    };

    let query = ProductQuery::new(&product)?;
    tracing::info!("Best price requested for '{}'", query);

    let report = state.crawler.best_price(&query).await?;
    Ok(Json(report))
}
