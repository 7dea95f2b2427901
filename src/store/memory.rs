//! In-memory Store
//!
//! Evaluates query descriptors over a vector of rows held in process.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{check_fields, QueryDescriptor, SortDirection, Store, Table};
use crate::error::Result;
use crate::models::Record;

// == Memory Store ==
/// Row storage with select/insert counters.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<Record>>,
    selects: AtomicUsize,
    inserts: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with `rows`.
    pub fn with_rows(rows: Vec<Record>) -> Self {
        Self {
            rows: RwLock::new(rows),
            ..Self::default()
        }
    }

    /// Number of `select` calls served so far.
    pub fn select_count(&self) -> usize {
        self.selects.load(AtomicOrdering::SeqCst)
    }

    /// Number of `insert` calls served so far.
    pub fn insert_count(&self) -> usize {
        self.inserts.load(AtomicOrdering::SeqCst)
    }

    /// Snapshot of every stored row in insertion order.
    pub async fn rows(&self) -> Vec<Record> {
        self.rows.read().await.clone()
    }
}

fn table_of(record: &Record) -> Table {
    match record {
        Record::SolarPlant(_) => Table::SolarPlants,
        Record::Product(_) => Table::Products,
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn select(&self, query: &QueryDescriptor) -> Result<Vec<Record>> {
        self.selects.fetch_add(1, AtomicOrdering::SeqCst);
        check_fields(query)?;

        let rows = self.rows.read().await;
        let mut matched: Vec<Record> = rows
            .iter()
            .filter(|row| table_of(row) == query.table())
            .filter(|row| {
                query.predicates().iter().all(|p| {
                    row.numeric_field(p.field.name())
                        .is_some_and(|v| p.comparator.matches(v, p.value))
                })
            })
            .cloned()
            .collect();

        let sort_field = query.order_by().name();
        matched.sort_by(|a, b| {
            let lhs = a.numeric_field(sort_field).unwrap_or(f64::NAN);
            let rhs = b.numeric_field(sort_field).unwrap_or(f64::NAN);
            let ord = lhs.partial_cmp(&rhs).unwrap_or(Ordering::Equal);
            match query.sort_direction() {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
        matched.truncate(query.row_limit() as usize);

        Ok(matched)
    }

    async fn insert(&self, record: &Record) -> Result<()> {
        self.inserts.fetch_add(1, AtomicOrdering::SeqCst);
        self.rows.write().await.push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Product, SolarPlant};
    use crate::store::{Comparator, Field};
    use chrono::Utc;

    fn plant(id: i64, kw: f64, temp: f64) -> Record {
        Record::from(SolarPlant {
            id,
            kw,
            temp,
            timestamp: Utc::now(),
        })
    }

    #[tokio::test]
    async fn test_select_orders_descending_and_limits() {
        let rows = (1..=30).map(|i| plant(i, i as f64, 20.0)).collect();
        let store = MemoryStore::with_rows(rows);

        let result = store
            .select(&QueryDescriptor::new(Table::SolarPlants, Field::Kw))
            .await
            .unwrap();

        assert_eq!(result.len(), 20);
        assert_eq!(result[0].id(), 30);
        assert_eq!(result[19].id(), 11);
        assert_eq!(store.select_count(), 1);
    }

    #[tokio::test]
    async fn test_select_applies_predicates_and_table() {
        let store = MemoryStore::with_rows(vec![
            plant(1, 2.0, 20.0),
            plant(2, 5.0, 22.0),
            plant(3, 8.0, 29.0),
            Record::from(Product {
                id: 4,
                title: "socks".to_string(),
                purchases: 10,
            }),
        ]);

        let query = QueryDescriptor::new(Table::SolarPlants, Field::Kw)
            .filter(Field::Kw, Comparator::Gte, 3.0)
            .filter(Field::Temp, Comparator::Lte, 25.0);
        let result = store.select(&query).await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id(), 2);
    }

    #[tokio::test]
    async fn test_insert_appends() {
        let store = MemoryStore::new();
        store.insert(&plant(1, 1.0, 1.0)).await.unwrap();
        store.insert(&plant(1, 2.0, 1.0)).await.unwrap();

        // Duplicate ids are accepted
        assert_eq!(store.rows().await.len(), 2);
        assert_eq!(store.insert_count(), 2);
    }

    #[tokio::test]
    async fn test_select_empty_store() {
        let store = MemoryStore::new();
        let result = store
            .select(&QueryDescriptor::new(Table::Products, Field::Purchases))
            .await
            .unwrap();
        assert!(result.is_empty());
    }
}
