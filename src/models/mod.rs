//! Record, request, and response models
//!
//! Persisted row types plus the DTOs used for serializing/deserializing
//! HTTP request and response bodies.

pub mod records;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use records::{Product, Record, SolarPlant};
pub use requests::{CreateReadingRequest, ValidReading};
pub use responses::{
    CreatedResponse, ErrorResponse, FilterResponse, HealthResponse, HighestProductionResponse,
    MostPurchasedResponse,
};
