//! Database migration management commands.

use clap::{Args, Subcommand};

use freshguard_core::config::{AppConfig, DatabaseProvider};
use freshguard_core::error::AppError;
use freshguard_database::DatabasePool;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    if config.database.provider != DatabaseProvider::Postgres {
        return Err(AppError::configuration(
            "Migrations apply to the postgres provider only",
        ));
    }

    match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            let mut database = config.database.clone();
            database.run_migrations = false;
            let pool = DatabasePool::connect(&database).await?;
            freshguard_database::migration::run_migrations(pool.pool()).await?;
            pool.close().await;
            output::print_success("All migrations applied successfully.");
        }
    }

    Ok(())
}
