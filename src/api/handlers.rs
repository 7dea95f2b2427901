//! API Handlers
//!
//! HTTP request handlers for each read and write endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use utoipa::OpenApi;

use crate::cache::Cache;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    CreateReadingRequest, CreatedResponse, ErrorResponse, FilterResponse, HealthResponse,
    HighestProductionResponse, MostPurchasedResponse, Record,
};
use crate::service::{FilterSample, ReadQuery, ReadThrough, Writer};
use crate::store::Store;

use super::openapi::ApiDoc;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cached and uncached reads
    pub reader: ReadThrough,
    /// Inserts
    pub writer: Writer,
}

impl AppState {
    /// Wires both handlers to the same cache and store.
    pub fn new(cache: Arc<dyn Cache>, store: Arc<dyn Store>) -> Self {
        Self {
            reader: ReadThrough::new(cache, Arc::clone(&store)),
            writer: Writer::new(store),
        }
    }

    /// Like [`AppState::new`], enabling miss coalescing when configured.
    pub fn from_config(config: &Config, cache: Arc<dyn Cache>, store: Arc<dyn Store>) -> Self {
        let mut state = Self::new(cache, store);
        if config.coalesce_misses {
            state.reader = state.reader.with_coalescing();
        }
        state
    }

    async fn cached(&self, query: ReadQuery) -> Result<Vec<Record>> {
        self.reader
            .read_through(&query.descriptor(), &query.cache_key(), query.ttl_secs())
            .await
    }

    async fn uncached(&self, query: ReadQuery) -> Result<Vec<Record>> {
        self.reader.read_direct(&query.descriptor()).await
    }
}

/// Handler for GET /
///
/// Top 20 plants by production, cached for 5 seconds.
#[utoipa::path(
    get,
    path = "/",
    tag = "Solar plants",
    responses(
        (status = 200, description = "Top plants by kw", body = HighestProductionResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn highest_production(
    State(state): State<AppState>,
) -> Result<Json<HighestProductionResponse>> {
    let rows = state.cached(ReadQuery::HighestProduction).await?;
    Ok(Json(HighestProductionResponse {
        highest_production: rows,
    }))
}

/// Handler for GET /no-redis
#[utoipa::path(
    get,
    path = "/no-redis",
    tag = "Solar plants",
    responses(
        (status = 200, description = "Top plants by kw, read from the store", body = HighestProductionResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn highest_production_uncached(
    State(state): State<AppState>,
) -> Result<Json<HighestProductionResponse>> {
    let rows = state.uncached(ReadQuery::HighestProduction).await?;
    Ok(Json(HighestProductionResponse {
        highest_production: rows,
    }))
}

/// Handler for GET /filter
///
/// Samples `kw` and `temp` server-side and returns the matching plants,
/// cached for 10 seconds under `"{kw}-{temp}"`.
#[utoipa::path(
    get,
    path = "/filter",
    tag = "Solar plants",
    responses(
        (status = 200, description = "Plants matching a server-sampled filter", body = FilterResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn filtered(State(state): State<AppState>) -> Result<Json<FilterResponse>> {
    let sample = FilterSample::random();
    let rows = state.cached(ReadQuery::Filtered(sample)).await?;
    Ok(Json(filter_response(sample, rows)))
}

/// Handler for GET /no-redis/filter
#[utoipa::path(
    get,
    path = "/no-redis/filter",
    tag = "Solar plants",
    responses(
        (status = 200, description = "Plants matching a server-sampled filter, read from the store", body = FilterResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn filtered_uncached(State(state): State<AppState>) -> Result<Json<FilterResponse>> {
    let sample = FilterSample::random();
    let rows = state.uncached(ReadQuery::Filtered(sample)).await?;
    Ok(Json(filter_response(sample, rows)))
}

fn filter_response(sample: FilterSample, rows: Vec<Record>) -> FilterResponse {
    FilterResponse {
        kw: sample.kw,
        temp: sample.temp,
        filtered: rows,
    }
}

/// Handler for GET /products
///
/// Top 20 products by purchases, cached for 5 seconds.
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    responses(
        (status = 200, description = "Top products by purchases", body = MostPurchasedResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn most_purchased(State(state): State<AppState>) -> Result<Json<MostPurchasedResponse>> {
    let rows = state.cached(ReadQuery::MostPurchased).await?;
    Ok(Json(MostPurchasedResponse {
        most_purchased: rows,
    }))
}

/// Handler for GET /no-redis/products
#[utoipa::path(
    get,
    path = "/no-redis/products",
    tag = "Products",
    responses(
        (status = 200, description = "Top products by purchases, read from the store", body = MostPurchasedResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn most_purchased_uncached(
    State(state): State<AppState>,
) -> Result<Json<MostPurchasedResponse>> {
    let rows = state.uncached(ReadQuery::MostPurchased).await?;
    Ok(Json(MostPurchasedResponse {
        most_purchased: rows,
    }))
}

/// Handler for POST /
///
/// Stores one reading. Cached reads are not invalidated.
#[utoipa::path(
    post,
    path = "/",
    tag = "Solar plants",
    request_body = CreateReadingRequest,
    responses(
        (status = 201, description = "Reading stored", body = CreatedResponse),
        (status = 400, description = "Missing field or malformed body", body = ErrorResponse),
        (status = 500, description = "Insert failed", body = ErrorResponse),
    )
)]
pub async fn create_reading(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateReadingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let Json(req) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    let reading = state.writer.create(&req).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse::new(reading))))
}

/// Handler for GET /health
#[utoipa::path(
    get,
    path = "/health",
    tag = "Operations",
    responses((status = 200, description = "Server is up", body = HealthResponse))
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Handler for GET /api-docs
///
/// Serves the OpenAPI document for this API.
pub async fn api_docs() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
