//! Solar Cache - read-through caching for solar plant and product queries
//!
//! Serves top-N and sampled-filter queries over PostgreSQL through a
//! short-lived Redis cache. Writes go straight to the store and never
//! invalidate cached results, so reads are stale for at most one ttl.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::Config;
pub use tasks::spawn_cleanup_task;
