//! Store Module
//!
//! The authoritative relational backend behind the cache.

mod memory;
mod postgres;
pub mod query;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::Record;

pub use memory::MemoryStore;
pub use postgres::{PgStore, PgStoreConfig};
pub use query::{Comparator, Field, Predicate, QueryDescriptor, SortDirection, Table, RESULT_LIMIT};

// == Store Trait ==
/// Relational store holding every persisted record.
#[async_trait]
pub trait Store: Send + Sync {
    /// Runs a select and returns the rows in the descriptor's order.
    async fn select(&self, query: &QueryDescriptor) -> Result<Vec<Record>>;

    /// Inserts one row into the record's table.
    async fn insert(&self, record: &Record) -> Result<()>;
}

/// Rejects descriptors that filter or sort on a column the table lacks.
pub(crate) fn check_fields(query: &QueryDescriptor) -> Result<()> {
    let table = query.table();
    let fields = query
        .predicates()
        .iter()
        .map(|p| p.field)
        .chain(std::iter::once(query.order_by()));

    for field in fields {
        if !table.has_numeric_field(field) {
            return Err(AppError::Internal(format!(
                "{} has no numeric column {}",
                table,
                field.name()
            )));
        }
    }
    Ok(())
}
