//! API Module
//!
//! HTTP handlers and routing for the data-access REST API.
//!
//! # Endpoints
//! - `GET /`, `GET /no-redis` - Top plants by production
//! - `GET /filter`, `GET /no-redis/filter` - Plants matching a sampled filter
//! - `GET /products`, `GET /no-redis/products` - Top products by purchases
//! - `POST /` - Insert a reading
//! - `GET /api-docs` - OpenAPI document
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod openapi;
pub mod routes;

pub use handlers::*;
pub use openapi::ApiDoc;
pub use routes::create_router;
