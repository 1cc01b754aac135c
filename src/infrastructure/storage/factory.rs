//! Storage factory for runtime storage selection

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::domain::{CustomerRepository, DomainError};
use crate::infrastructure::customer::{InMemoryCustomerRepository, PostgresCustomerRepository};

use super::migrations::run_storage_migrations;
use super::postgres::{connect_pool, PostgresConfig};

/// Supported storage types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Storage section of the application configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// `postgres` or `memory`
    pub backend: String,
    /// Apply pending migrations on startup
    pub run_migrations: bool,
    pub postgres: PostgresConfig,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: "postgres".to_string(),
            run_migrations: true,
            postgres: PostgresConfig::default(),
        }
    }
}

impl StorageSettings {
    pub fn storage_type(&self) -> Result<StorageType, DomainError> {
        StorageType::from_str(&self.backend).ok_or_else(|| {
            DomainError::configuration(format!("Unknown storage backend '{}'", self.backend))
        })
    }
}

/// Builds the customer repository for the configured backend
pub async fn create_customer_repository(
    settings: &StorageSettings,
) -> Result<Arc<dyn CustomerRepository>, DomainError> {
    let storage_type = settings.storage_type()?;
    info!("Storage backend: {:?}", storage_type);

    match storage_type {
        StorageType::InMemory => Ok(Arc::new(InMemoryCustomerRepository::new())),
        StorageType::Postgres => {
            let pool = connect_pool(&settings.postgres).await?;

            if settings.run_migrations {
                run_storage_migrations(&pool).await?;
            }

            Ok(Arc::new(PostgresCustomerRepository::new(pool)))
        }
    }
}
