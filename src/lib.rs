//! Customer Cache
//!
//! Exposes customers over HTTP with:
//! - PostgreSQL or in-memory storage
//! - A bounded read-through cache (LRU + idle expiry) for lookups by name
//! - Structured logging, OpenTelemetry tracing and Prometheus metrics

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use api::state::AppState;
use infrastructure::storage::create_customer_repository;
use tracing::info;

/// Create the application state for the configured store and cache
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let repository = create_customer_repository(&config.storage).await?;

    info!(
        max_capacity = config.cache.max_capacity,
        time_to_idle_secs = config.cache.time_to_idle_secs,
        single_flight = config.cache.single_flight,
        detached_fetch = config.cache.detached_fetch,
        "Customer cache configured"
    );

    Ok(AppState::with_repository(repository, config.cache.clone()))
}
