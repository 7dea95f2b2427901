//! Read-Through Handler
//!
//! Serves a query from the cache when a live entry exists, otherwise reads
//! the store and repopulates the cache with the query's ttl.
//!
//! Cache failures never fail a read: a lookup error is treated as a miss
//! and a failed repopulation still returns the store result.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::cache::Cache;
use crate::error::Result;
use crate::models::Record;
use crate::store::{QueryDescriptor, Store};

// == Fill Locks ==
/// Per-key locks so that only one request at a time refills a given key.
#[derive(Default)]
struct FillLocks {
    slots: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl FillLocks {
    async fn slot(&self, key: &str) -> Arc<Mutex<()>> {
        let mut slots = self.slots.lock().await;
        Arc::clone(
            slots
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }

    /// Drops the slot once no other request holds it.
    async fn release(&self, key: &str, slot: Arc<Mutex<()>>) {
        let mut slots = self.slots.lock().await;
        // One reference in the map, one here
        if Arc::strong_count(&slot) <= 2 {
            slots.remove(key);
        }
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }
}

// == Read Through ==
#[derive(Clone)]
pub struct ReadThrough {
    cache: Arc<dyn Cache>,
    store: Arc<dyn Store>,
    fills: Option<Arc<FillLocks>>,
}

impl ReadThrough {
    /// Creates a handler where concurrent misses race independently.
    pub fn new(cache: Arc<dyn Cache>, store: Arc<dyn Store>) -> Self {
        Self {
            cache,
            store,
            fills: None,
        }
    }

    /// Serializes store fills per key: requests that miss while another
    /// request is filling the same key wait and then read its result from
    /// the cache.
    pub fn with_coalescing(mut self) -> Self {
        self.fills = Some(Arc::new(FillLocks::default()));
        self
    }

    /// Returns the rows for `query`, from the cache under `key` when a live
    /// entry exists.
    pub async fn read_through(
        &self,
        query: &QueryDescriptor,
        key: &str,
        ttl_secs: u64,
    ) -> Result<Vec<Record>> {
        if let Some(rows) = self.lookup(key).await {
            return Ok(rows);
        }

        let Some(fills) = &self.fills else {
            return self.fill(query, key, ttl_secs).await;
        };

        let slot = fills.slot(key).await;
        let result = {
            let _guard = slot.lock().await;
            // Another request may have filled the key while we waited
            match self.lookup(key).await {
                Some(rows) => Ok(rows),
                None => self.fill(query, key, ttl_secs).await,
            }
        };
        fills.release(key, slot).await;
        result
    }

    /// Reads the store directly, bypassing the cache entirely.
    pub async fn read_direct(&self, query: &QueryDescriptor) -> Result<Vec<Record>> {
        self.store.select(query).await
    }

    async fn lookup(&self, key: &str) -> Option<Vec<Record>> {
        let cached = match self.cache.get(key).await {
            Ok(cached) => cached?,
            Err(e) => {
                warn!(key, error = %e, "cache lookup failed, reading store");
                return None;
            }
        };

        match serde_json::from_str(&cached) {
            Ok(rows) => {
                debug!(key, "cache hit");
                Some(rows)
            }
            Err(e) => {
                warn!(key, error = %e, "discarding undecodable cache entry");
                None
            }
        }
    }

    async fn fill(&self, query: &QueryDescriptor, key: &str, ttl_secs: u64) -> Result<Vec<Record>> {
        debug!(key, "cache miss");
        let rows = self.store.select(query).await?;

        match serde_json::to_string(&rows) {
            Ok(serialized) => {
                if let Err(e) = self.cache.set_ex(key, serialized, ttl_secs).await {
                    warn!(key, error = %e, "cache write failed");
                }
            }
            Err(e) => warn!(key, error = %e, "failed to serialize rows for cache"),
        }

        Ok(rows)
    }

    #[cfg(test)]
    async fn pending_fills(&self) -> usize {
        match &self.fills {
            Some(fills) => fills.len().await,
            None => 0,
        }
    }
}
