//! Request DTOs for the data-access API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use utoipa::ToSchema;

/// Request body for inserting a reading (POST /)
///
/// Every field is optional at the serde level so that an absent field is
/// reported as a validation failure rather than a parse failure. A present
/// zero is a valid value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateReadingRequest {
    /// Caller-supplied plant identifier
    #[serde(default)]
    pub id: Option<i64>,
    /// Production in kilowatts
    #[serde(default)]
    pub kw: Option<f64>,
    /// Panel temperature
    #[serde(default)]
    pub temp: Option<f64>,
}

/// A request whose required fields have all been checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidReading {
    pub id: i64,
    pub kw: f64,
    pub temp: f64,
}

impl CreateReadingRequest {
    /// Validates the request data
    ///
    /// Returns the names of every missing field on failure.
    pub fn validate(&self) -> Result<ValidReading, Vec<&'static str>> {
        let mut missing = Vec::new();
        if self.id.is_none() {
            missing.push("id");
        }
        if self.kw.is_none() {
            missing.push("kw");
        }
        if self.temp.is_none() {
            missing.push("temp");
        }

        match (self.id, self.kw, self.temp) {
            (Some(id), Some(kw), Some(temp)) => Ok(ValidReading { id, kw, temp }),
            _ => Err(missing),
        }
    }
}
