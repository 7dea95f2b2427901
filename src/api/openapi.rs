//! OpenAPI Document
//!
//! Machine-readable description of the HTTP surface, generated by utoipa
//! from the handler annotations and served at `/api-docs`.

use utoipa::OpenApi;

use super::handlers;
use crate::models::{
    CreateReadingRequest, CreatedResponse, ErrorResponse, FilterResponse, HealthResponse,
    HighestProductionResponse, MostPurchasedResponse, Product, Record, SolarPlant,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Solar Cache API",
        description = "Solar plant and product queries served through a short-lived read-through cache"
    ),
    tags(
        (name = "Solar plants", description = "Production readings, cached and uncached"),
        (name = "Products", description = "Purchase rankings, cached and uncached"),
        (name = "Operations", description = "Liveness")
    ),
    paths(
        handlers::highest_production,
        handlers::highest_production_uncached,
        handlers::filtered,
        handlers::filtered_uncached,
        handlers::most_purchased,
        handlers::most_purchased_uncached,
        handlers::create_reading,
        handlers::health_handler,
    ),
    components(schemas(
        SolarPlant,
        Product,
        Record,
        CreateReadingRequest,
        CreatedResponse,
        HighestProductionResponse,
        FilterResponse,
        MostPurchasedResponse,
        HealthResponse,
        ErrorResponse,
    ))
)]
pub struct ApiDoc;
