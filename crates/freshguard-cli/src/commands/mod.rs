//! CLI command definitions and dispatch.

pub mod item;
pub mod migrate;
pub mod scan;
pub mod stats;
pub mod token;
pub mod user;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use freshguard_core::config::{AppConfig, DatabaseProvider};
use freshguard_core::error::AppError;
use freshguard_core::traits::{Clock, SystemClock};
use freshguard_database::{DatabasePool, MemoryStore, Stores};
use freshguard_service::InventoryService;

use crate::output::{self, OutputFormat};

/// FreshGuard: expiry tracking and reminders for household inventory
#[derive(Debug, Parser)]
#[command(name = "freshguard", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding `default.toml` and per-environment overrides
    #[arg(short, long, default_value = "config")]
    pub config: String,

    /// Configuration environment, e.g. `production` loads `<config>/production.toml`
    #[arg(short, long, default_value = "default")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Run an expiry scan now
    Scan(scan::ScanArgs),
    /// Show a user's item stats
    Stats(stats::StatsArgs),
    /// User management
    User(user::UserArgs),
    /// Item management
    Item(item::ItemArgs),
    /// Issue a session token for a user
    Token(token::TokenArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load_from(&self.config, &self.env)?;
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::Scan(args) => scan::execute(args, &config, self.format).await,
            Commands::Stats(args) => stats::execute(args, &config, self.format).await,
            Commands::User(args) => user::execute(args, &config, self.format).await,
            Commands::Item(args) => item::execute(args, &config, self.format).await,
            Commands::Token(args) => token::execute(args, &config).await,
        }
    }
}

/// Stores for the configured provider, with the pool when PostgreSQL is used.
pub async fn open_stores(config: &AppConfig) -> Result<(Stores, Option<DatabasePool>), AppError> {
    match config.database.provider {
        DatabaseProvider::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;
            Ok((Stores::postgres(pool.pool().clone()), Some(pool)))
        }
        DatabaseProvider::Memory => {
            output::print_warning("Using the in-memory store; nothing will be kept after exit.");
            Ok((Stores::memory(Arc::new(MemoryStore::new())), None))
        }
    }
}

/// The wall clock used by every command.
pub fn clock() -> Arc<dyn Clock> {
    Arc::new(SystemClock)
}

/// Inventory service over `stores`.
pub fn inventory(stores: &Stores) -> InventoryService {
    InventoryService::new(stores.users.clone(), stores.items.clone(), clock())
}
