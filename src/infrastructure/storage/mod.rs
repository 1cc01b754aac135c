//! Storage infrastructure - backend selection, pooling and migrations

mod factory;
pub mod migrations;
mod postgres;

pub use factory::{create_customer_repository, StorageSettings, StorageType};
pub use migrations::{
    revert_latest_migration, run_storage_migrations, Migration, PostgresMigrator,
};
pub use postgres::{connect_pool, PostgresConfig};
