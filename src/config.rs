//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Which cache implementation backs the read-through endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    /// Shared Redis server
    Redis,
    /// Process-local TTL map
    Memory,
}

impl FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(CacheBackend::Redis),
            "memory" => Ok(CacheBackend::Memory),
            other => Err(format!("unknown cache backend '{}'", other)),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// PostgreSQL user
    pub postgres_user: String,
    /// PostgreSQL password
    pub postgres_password: String,
    /// PostgreSQL host
    pub postgres_host: String,
    /// PostgreSQL port
    pub postgres_port: u16,
    /// PostgreSQL database name
    pub postgres_db: String,
    /// Maximum number of pooled PostgreSQL connections
    pub postgres_pool_size: usize,
    /// Redis host
    pub redis_host: String,
    /// Redis port
    pub redis_port: u16,
    /// Cache implementation
    pub cache_backend: CacheBackend,
    /// Serialize concurrent cache fills for the same key
    pub coalesce_misses: bool,
    /// In-memory cache sweep interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `POSTGRES_USER` / `POSTGRES_PASSWORD` - credentials (default: postgres / empty)
    /// - `POSTGRES_IP` / `POSTGRES_PORT` - address (default: localhost:5432)
    /// - `POSTGRES_DB` - database name (default: same as the user)
    /// - `POSTGRES_POOL_SIZE` - pool size (default: 16)
    /// - `REDIS_IP` / `REDIS_PORT` - address (default: localhost:6379)
    /// - `CACHE_BACKEND` - `redis` or `memory` (default: redis)
    /// - `COALESCE_MISSES` - `true` to dedupe concurrent fills (default: false)
    /// - `CLEANUP_INTERVAL` - memory cache sweep in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let postgres_user = env::var("POSTGRES_USER").unwrap_or(defaults.postgres_user);

        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            postgres_password: env::var("POSTGRES_PASSWORD").unwrap_or(defaults.postgres_password),
            postgres_host: env::var("POSTGRES_IP").unwrap_or(defaults.postgres_host),
            postgres_port: parse_var("POSTGRES_PORT").unwrap_or(defaults.postgres_port),
            postgres_db: env::var("POSTGRES_DB").unwrap_or_else(|_| postgres_user.clone()),
            postgres_user,
            postgres_pool_size: parse_var("POSTGRES_POOL_SIZE")
                .unwrap_or(defaults.postgres_pool_size),
            redis_host: env::var("REDIS_IP").unwrap_or(defaults.redis_host),
            redis_port: parse_var("REDIS_PORT").unwrap_or(defaults.redis_port),
            cache_backend: parse_var("CACHE_BACKEND").unwrap_or(defaults.cache_backend),
            coalesce_misses: parse_var("COALESCE_MISSES").unwrap_or(defaults.coalesce_misses),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
        }
    }

    /// Connection URL for the Redis client.
    pub fn redis_url(&self) -> String {
        format!("redis://{}:{}/", self.redis_host, self.redis_port)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            postgres_user: "postgres".to_string(),
            postgres_password: String::new(),
            postgres_host: "localhost".to_string(),
            postgres_port: 5432,
            postgres_db: "postgres".to_string(),
            postgres_pool_size: 16,
            redis_host: "localhost".to_string(),
            redis_port: 6379,
            cache_backend: CacheBackend::Redis,
            coalesce_misses: false,
            cleanup_interval: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.postgres_port, 5432);
        assert_eq!(config.redis_port, 6379);
        assert_eq!(config.cache_backend, CacheBackend::Redis);
        assert!(!config.coalesce_misses);
    }

    #[test]
    fn test_redis_url() {
        let config = Config {
            redis_host: "10.0.0.5".to_string(),
            redis_port: 6380,
            ..Config::default()
        };
        assert_eq!(config.redis_url(), "redis://10.0.0.5:6380/");
    }

    #[test]
    fn test_cache_backend_parse() {
        assert_eq!("redis".parse::<CacheBackend>(), Ok(CacheBackend::Redis));
        assert_eq!(" Memory ".parse::<CacheBackend>(), Ok(CacheBackend::Memory));
        assert!("memcached".parse::<CacheBackend>().is_err());
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("SERVER_PORT");
        env::remove_var("POSTGRES_USER");
        env::remove_var("POSTGRES_DB");
        env::remove_var("CACHE_BACKEND");
        env::remove_var("COALESCE_MISSES");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.postgres_user, "postgres");
        assert_eq!(config.postgres_db, "postgres");
        assert_eq!(config.cache_backend, CacheBackend::Redis);
        assert!(!config.coalesce_misses);
    }
}
