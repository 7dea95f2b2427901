//! Solar Cache - read-through caching for solar plant and product queries
//!
//! HTTP entry point: connects the store and the cache, then serves the API.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use solar_cache::cache::{Cache, MemoryCache, RedisCache};
use solar_cache::config::CacheBackend;
use solar_cache::store::{PgStore, PgStoreConfig, Store};
use solar_cache::{create_router, spawn_cleanup_task, AppState, Config};

/// Main entry point for the Solar Cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the PostgreSQL pool
/// 4. Connect the cache (startup fails if Redis is unreachable)
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "solar_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Solar Cache Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: postgres={}:{}/{}, cache={:?}, port={}, coalesce_misses={}",
        config.postgres_host,
        config.postgres_port,
        config.postgres_db,
        config.cache_backend,
        config.server_port,
        config.coalesce_misses
    );

    let store: Arc<dyn Store> = Arc::new(
        PgStore::from_config(&PgStoreConfig::from(&config))
            .context("failed to create PostgreSQL pool")?,
    );
    info!("Store pool initialized");

    let (cache, cleanup_handle): (Arc<dyn Cache>, Option<JoinHandle<()>>) =
        match config.cache_backend {
            CacheBackend::Redis => {
                let redis = RedisCache::connect(&config.redis_url())
                    .await
                    .context("failed to connect to Redis")?;
                (Arc::new(redis) as Arc<dyn Cache>, None)
            }
            CacheBackend::Memory => {
                let memory = Arc::new(MemoryCache::new());
                let handle = spawn_cleanup_task(memory.clone(), config.cleanup_interval);
                info!("Background cleanup task started");
                (memory as Arc<dyn Cache>, Some(handle))
            }
        };

    let state = AppState::from_config(&config, cache, store);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Listening on port {}", config.server_port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task if one is running.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}
