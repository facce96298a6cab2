//! Per-user item stats.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use freshguard_core::config::AppConfig;
use freshguard_core::error::AppError;
use freshguard_service::{RequestContext, StatsService};

use crate::output::{self, OutputFormat};

/// Arguments for the stats command
#[derive(Debug, Args)]
pub struct StatsArgs {
    /// User id or email
    #[arg(short, long)]
    pub user: String,
}

/// Stats row for table output
#[derive(Debug, Serialize, Tabled)]
struct StatsRow {
    /// User email
    user: String,
    /// Total items
    total: u64,
    /// Fresh items
    fresh: u64,
    /// Items expiring soon
    expiring_soon: u64,
    /// Expired items
    expired: u64,
}

/// Execute the stats command
pub async fn execute(
    args: &StatsArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let (stores, _pool) = super::open_stores(config).await?;
    let user = super::inventory(&stores).find_user(&args.user).await?;

    let clock = super::clock();
    let ctx = RequestContext::new(user.id, user.email.clone(), clock.now());
    let stats = StatsService::new(stores.items.clone(), clock)
        .user_stats(&ctx)
        .await?;

    output::print_item(
        &StatsRow {
            user: user.email,
            total: stats.total,
            fresh: stats.fresh,
            expiring_soon: stats.expiring_soon,
            expired: stats.expired,
        },
        format,
    );
    Ok(())
}
