//! Persisted record types
//!
//! Rows of the `solar_plants` and `products` tables as they travel between
//! the store, the cache, and HTTP responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One reading of a solar plant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SolarPlant {
    /// Caller-supplied identifier, not unique
    pub id: i64,
    /// Production in kilowatts
    pub kw: f64,
    /// Panel temperature
    pub temp: f64,
    /// Server-assigned insert time
    pub timestamp: DateTime<Utc>,
}

/// One product row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub purchases: i64,
}

/// A row from any monitored table.
///
/// Serialized without a tag so responses carry the bare row object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum Record {
    SolarPlant(SolarPlant),
    Product(Product),
}

impl Record {
    /// Returns a numeric column by name, or `None` if this row has no such
    /// numeric column.
    pub fn numeric_field(&self, field: &str) -> Option<f64> {
        match (self, field) {
            (Record::SolarPlant(p), "id") => Some(p.id as f64),
            (Record::SolarPlant(p), "kw") => Some(p.kw),
            (Record::SolarPlant(p), "temp") => Some(p.temp),
            (Record::Product(p), "id") => Some(p.id as f64),
            (Record::Product(p), "purchases") => Some(p.purchases as f64),
            _ => None,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Record::SolarPlant(p) => p.id,
            Record::Product(p) => p.id,
        }
    }
}

impl From<SolarPlant> for Record {
    fn from(plant: SolarPlant) -> Self {
        Record::SolarPlant(plant)
    }
}

impl From<Product> for Record {
    fn from(product: Product) -> Self {
        Record::Product(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_serialization_is_bare_row() {
        let record = Record::from(Product {
            id: 7,
            title: "bag".to_string(),
            purchases: 120,
        });
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["title"], "bag");
        assert!(json.get("Product").is_none());
    }

    #[test]
    fn test_cached_rows_decode_to_their_table() {
        let json = r#"[
            {"id":1,"kw":4.5,"temp":22.0,"timestamp":"2024-05-01T10:00:00Z"},
            {"id":2,"title":"coat","purchases":3}
        ]"#;
        let records: Vec<Record> = serde_json::from_str(json).unwrap();
        assert!(matches!(records[0], Record::SolarPlant(_)));
        assert!(matches!(records[1], Record::Product(_)));
    }

    #[test]
    fn test_numeric_field() {
        let record = Record::from(SolarPlant {
            id: 3,
            kw: 9.0,
            temp: 21.5,
            timestamp: Utc::now(),
        });
        assert_eq!(record.numeric_field("kw"), Some(9.0));
        assert_eq!(record.numeric_field("purchases"), None);
        assert_eq!(record.id(), 3);
    }
}
