//! Write Handler
//!
//! Validates and inserts solar plant readings. Writes never touch the cache,
//! so cached reads stay stale until their entries expire.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use crate::error::{AppError, Result};
use crate::models::{CreateReadingRequest, Record, SolarPlant};
use crate::store::Store;

#[derive(Clone)]
pub struct Writer {
    store: Arc<dyn Store>,
}

impl Writer {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Inserts the reading with the current server time as its timestamp.
    ///
    /// # Errors
    /// - [`AppError::Validation`] when `id`, `kw`, or `temp` is absent; the
    ///   store is not called.
    /// - [`AppError::Store`] when the insert fails.
    pub async fn create(&self, req: &CreateReadingRequest) -> Result<SolarPlant> {
        let valid = req.validate().map_err(|missing| {
            AppError::Validation(format!("Missing field(s): {}", missing.join(", ")))
        })?;

        let reading = SolarPlant {
            id: valid.id,
            kw: valid.kw,
            temp: valid.temp,
            timestamp: Utc::now(),
        };

        if let Err(e) = self.store.insert(&Record::from(reading.clone())).await {
            error!(id = reading.id, error = %e, "failed to insert reading");
            return Err(AppError::Store(e.to_string()));
        }

        info!(id = reading.id, "reading created");
        Ok(reading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, QueryDescriptor};
    use async_trait::async_trait;

    struct FailingStore;

    #[async_trait]
    impl Store for FailingStore {
        async fn select(&self, _query: &QueryDescriptor) -> Result<Vec<Record>> {
            Ok(Vec::new())
        }

        async fn insert(&self, _record: &Record) -> Result<()> {
            Err(AppError::Store("duplicate key value".to_string()))
        }
    }

    fn request(id: Option<i64>, kw: Option<f64>, temp: Option<f64>) -> CreateReadingRequest {
        CreateReadingRequest { id, kw, temp }
    }

    #[tokio::test]
    async fn test_create_inserts_with_timestamp() {
        let store = Arc::new(MemoryStore::new());
        let writer = Writer::new(store.clone());
        let before = Utc::now();

        let reading = writer
            .create(&request(Some(1), Some(10.0), Some(20.0)))
            .await
            .unwrap();

        assert_eq!(reading.id, 1);
        assert!(reading.timestamp >= before);
        assert_eq!(store.rows().await, vec![Record::from(reading)]);
    }

    #[tokio::test]
    async fn test_missing_field_skips_store() {
        let store = Arc::new(MemoryStore::new());
        let writer = Writer::new(store.clone());

        let result = writer.create(&request(Some(2), Some(10.0), None)).await;

        assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("temp")));
        assert_eq!(store.insert_count(), 0);
    }

    #[tokio::test]
    async fn test_store_failure_is_store_error() {
        let writer = Writer::new(Arc::new(FailingStore));

        let result = writer.create(&request(Some(1), Some(1.0), Some(1.0))).await;
        assert!(matches!(result, Err(AppError::Store(_))));
    }
}
