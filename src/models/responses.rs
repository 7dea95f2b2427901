//! Response DTOs for the data-access API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use utoipa::ToSchema;

use super::records::{Record, SolarPlant};

/// Response body for GET / and GET /no-redis
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HighestProductionResponse {
    /// Top plants by production, highest first
    #[serde(rename = "highestProduction")]
    pub highest_production: Vec<Record>,
}

/// Response body for GET /filter and GET /no-redis/filter
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FilterResponse {
    /// Sampled minimum production
    pub kw: i64,
    /// Sampled maximum temperature
    pub temp: i64,
    /// Matching plants, highest production first
    pub filtered: Vec<Record>,
}

/// Response body for GET /products and GET /no-redis/products
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MostPurchasedResponse {
    #[serde(rename = "mostPurchased")]
    pub most_purchased: Vec<Record>,
}

/// Response body for a successful insert (POST /)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreatedResponse {
    /// Success message
    pub message: String,
    /// The stored reading, including its server timestamp
    pub reading: SolarPlant,
}

impl CreatedResponse {
    pub fn new(reading: SolarPlant) -> Self {
        Self {
            message: format!("Reading for plant {} created", reading.id),
            reading,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_highest_production_field_name() {
        let response = HighestProductionResponse {
            highest_production: vec![],
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"highestProduction":[]}"#);
    }

    #[test]
    fn test_created_response_message() {
        let response = CreatedResponse::new(SolarPlant {
            id: 12,
            kw: 1.0,
            temp: 2.0,
            timestamp: Utc::now(),
        });
        assert!(response.message.contains("12"));
    }

    #[test]
    fn test_health_response() {
        let response = HealthResponse::healthy();
        assert_eq!(response.status, "healthy");
        assert!(!response.timestamp.is_empty());
    }
}
