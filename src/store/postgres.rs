//! PostgreSQL Store
//!
//! Runs query descriptors against PostgreSQL through a deadpool connection
//! pool. Numeric columns are cast on the way in and out so the store works
//! whether the schema declares them as integer or floating point.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deadpool_postgres::{Config, ManagerConfig, Pool, PoolConfig, RecyclingMethod, Runtime};
use tokio_postgres::{types::ToSql, NoTls, Row};
use tracing::debug;

use super::{check_fields, QueryDescriptor, Store, Table};
use crate::config::Config as AppConfig;
use crate::error::{AppError, Result};
use crate::models::{Product, Record, SolarPlant};

// == Pool Configuration ==
/// Connection parameters for the store pool.
#[derive(Debug, Clone)]
pub struct PgStoreConfig {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
    pub max_size: usize,
}

impl From<&AppConfig> for PgStoreConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            host: config.postgres_host.clone(),
            port: config.postgres_port,
            dbname: config.postgres_db.clone(),
            user: config.postgres_user.clone(),
            password: config.postgres_password.clone(),
            max_size: config.postgres_pool_size,
        }
    }
}

impl PgStoreConfig {
    /// Create a connection pool from this configuration.
    ///
    /// Connections are opened lazily on first checkout.
    pub fn create_pool(&self) -> Result<Pool> {
        let mut cfg = Config::new();
        cfg.host = Some(self.host.clone());
        cfg.port = Some(self.port);
        cfg.dbname = Some(self.dbname.clone());
        cfg.user = Some(self.user.clone());
        cfg.password = Some(self.password.clone());

        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });

        cfg.pool = Some(PoolConfig::new(self.max_size));

        let pool = cfg
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| AppError::Store(format!("Failed to create pool: {}", e)))?;

        Ok(pool)
    }
}

// == PostgreSQL Store ==
#[derive(Clone)]
pub struct PgStore {
    pool: Pool,
}

impl PgStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    pub fn from_config(config: &PgStoreConfig) -> Result<Self> {
        Ok(Self::new(config.create_pool()?))
    }

    async fn get_conn(&self) -> Result<deadpool_postgres::Object> {
        self.pool.get().await.map_err(AppError::from)
    }
}

fn select_columns(table: Table) -> &'static str {
    match table {
        Table::SolarPlants => {
            r#"id::int8 AS id, kw::float8 AS kw, temp::float8 AS temp, "timestamp"::timestamptz AS "timestamp""#
        }
        Table::Products => "id::int8 AS id, title::text AS title, purchases::int8 AS purchases",
    }
}

fn record_from_row(table: Table, row: &Row) -> Result<Record> {
    let record = match table {
        Table::SolarPlants => Record::SolarPlant(SolarPlant {
            id: row.try_get("id")?,
            kw: row.try_get("kw")?,
            temp: row.try_get("temp")?,
            timestamp: row.try_get::<_, DateTime<Utc>>("timestamp")?,
        }),
        Table::Products => Record::Product(Product {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            purchases: row.try_get("purchases")?,
        }),
    };
    Ok(record)
}

#[async_trait]
impl Store for PgStore {
    async fn select(&self, query: &QueryDescriptor) -> Result<Vec<Record>> {
        check_fields(query)?;

        let (tail, params) = query.sql_tail();
        let sql = format!(
            "SELECT {} FROM {}{}",
            select_columns(query.table()),
            query.table(),
            tail
        );
        let params: Vec<&(dyn ToSql + Sync)> =
            params.iter().map(|p| p as &(dyn ToSql + Sync)).collect();

        debug!(%sql, "store select");
        let conn = self.get_conn().await?;
        let rows = conn.query(sql.as_str(), &params).await?;

        rows.iter()
            .map(|row| record_from_row(query.table(), row))
            .collect()
    }

    async fn insert(&self, record: &Record) -> Result<()> {
        let conn = self.get_conn().await?;

        match record {
            Record::SolarPlant(p) => {
                conn.execute(
                    r#"INSERT INTO solar_plants (id, kw, temp, "timestamp") VALUES ($1::int8, $2::float8, $3::float8, $4::timestamptz)"#,
                    &[&p.id, &p.kw, &p.temp, &p.timestamp],
                )
                .await?;
            }
            Record::Product(p) => {
                conn.execute(
                    "INSERT INTO products (id, title, purchases) VALUES ($1::int8, $2::text, $3::int8)",
                    &[&p.id, &p.title, &p.purchases],
                )
                .await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_app_config() {
        let app = AppConfig {
            postgres_host: "db".to_string(),
            postgres_port: 6543,
            postgres_user: "solar".to_string(),
            postgres_db: "solar".to_string(),
            postgres_pool_size: 4,
            ..AppConfig::default()
        };
        let config = PgStoreConfig::from(&app);
        assert_eq!(config.host, "db");
        assert_eq!(config.port, 6543);
        assert_eq!(config.dbname, "solar");
        assert_eq!(config.max_size, 4);
    }

    #[tokio::test]
    async fn test_create_pool_is_lazy() {
        // No server is listening; building the pool must still succeed.
        let config = PgStoreConfig::from(&AppConfig::default());
        let pool = config.create_pool().unwrap();
        assert_eq!(pool.status().size, 0);
    }

    #[test]
    fn test_select_columns_cover_record_fields() {
        let columns = select_columns(Table::SolarPlants);
        for field in ["AS id", "AS kw", "AS temp", r#"AS "timestamp""#] {
            assert!(columns.contains(field));
        }
    }
}
