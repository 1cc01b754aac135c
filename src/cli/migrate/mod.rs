//! Migrate command - manages the customer table schema

use clap::Args;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::storage::{
    connect_pool, revert_latest_migration, run_storage_migrations, PostgresMigrator,
};

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct MigrateArgs {
    /// Revert the most recently applied migration instead
    #[arg(long)]
    pub revert: bool,
}

/// Run the migrate command
pub async fn run(args: MigrateArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let (config, load_error) = AppConfig::load_or_default();
    logging::init_logging(&(&config.logging).into());

    if let Some(e) = load_error {
        warn!("Failed to load configuration, using defaults: {}", e);
    }

    let pool = connect_pool(&config.storage.postgres).await?;

    if args.revert {
        match revert_latest_migration(&pool).await? {
            Some(version) => info!(version, "Reverted migration"),
            None => info!("No migrations to revert"),
        }
    } else {
        run_storage_migrations(&pool).await?;
    }

    let version = PostgresMigrator::new(pool.clone()).current_version().await?;
    info!(version = ?version, "Schema version");

    pool.close().await;
    Ok(())
}
