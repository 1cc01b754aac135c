//! CLI module
//!
//! - `serve`: HTTP server (default)
//! - `migrate`: apply or revert store migrations

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// Customer service with a read-through cache over the customer store
#[derive(Parser, Debug)]
#[command(name = "customer-cache")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,

    /// Apply pending migrations to the PostgreSQL store
    Migrate(migrate::MigrateArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["customer-cache"]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["customer-cache", "serve"]).unwrap();
        assert_eq!(cli.command, Some(Command::Serve));
    }

    #[test]
    fn test_parse_migrate_revert() {
        let cli = Cli::try_parse_from(["customer-cache", "migrate", "--revert"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Migrate(migrate::MigrateArgs { revert: true }))
        );
    }
}
