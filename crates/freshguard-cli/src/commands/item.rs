//! Item management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use freshguard_core::config::AppConfig;
use freshguard_core::error::AppError;
use freshguard_core::types::ItemId;
use freshguard_entity::item::{Item, NewItem};
use freshguard_service::{RequestContext, classify};

use crate::output::{self, OutputFormat};

/// Arguments for item commands
#[derive(Debug, Args)]
pub struct ItemArgs {
    /// Item subcommand
    #[command(subcommand)]
    pub command: ItemCommand,
}

/// Item subcommands
#[derive(Debug, Subcommand)]
pub enum ItemCommand {
    /// Add an item to a user's inventory
    Add {
        /// Owner id or email
        #[arg(short, long)]
        user: String,
        /// Item name
        #[arg(long)]
        name: String,
        /// Category
        #[arg(long, default_value = "Other")]
        category: String,
        /// Storage location
        #[arg(long, default_value = "Pantry")]
        location: String,
        /// Days from now until expiry; negative for already expired
        #[arg(long, allow_hyphen_values = true)]
        expires_in_days: i64,
        /// Quantity
        #[arg(long, default_value_t = 1)]
        quantity: i32,
        /// Unit
        #[arg(long, default_value = "pcs")]
        unit: String,
    },
    /// List a user's items with their current status
    List {
        /// Owner id or email
        #[arg(short, long)]
        user: String,
    },
    /// Remove an item and its reminder history
    Remove {
        /// Owner id or email
        #[arg(short, long)]
        user: String,
        /// Item ID
        id: ItemId,
    },
}

/// Item display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ItemRow {
    /// Item ID
    id: String,
    /// Name
    name: String,
    /// Location
    location: String,
    /// Expiry date
    expires: String,
    /// Derived status
    status: String,
}

impl ItemRow {
    fn new(item: &Item, now: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            location: item.location.clone(),
            expires: item.expiry_date.format("%Y-%m-%d").to_string(),
            status: classify(item.expiry_date, now).as_str().to_string(),
        }
    }
}

/// Execute item commands
pub async fn execute(
    args: &ItemArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let (stores, _pool) = super::open_stores(config).await?;
    let inventory = super::inventory(&stores);
    let now = super::clock().now();

    match &args.command {
        ItemCommand::Add {
            user,
            name,
            category,
            location,
            expires_in_days,
            quantity,
            unit,
        } => {
            let owner = inventory.find_user(user).await?;
            let ctx = RequestContext::new(owner.id, owner.email, now);
            let item = inventory
                .add_item(
                    &ctx,
                    &NewItem {
                        name: name.clone(),
                        category: category.clone(),
                        purchase_date: now.min(now + chrono::Duration::days(*expires_in_days)),
                        expiry_date: now + chrono::Duration::days(*expires_in_days),
                        location: location.clone(),
                        quantity: *quantity,
                        unit: unit.clone(),
                        notes: None,
                    },
                )
                .await?;
            output::print_success(&format!("Item '{}' added", item.name));
            output::print_item(&ItemRow::new(&item, now), format);
        }
        ItemCommand::List { user } => {
            let owner = inventory.find_user(user).await?;
            let items = stores.items.find_items_by_user(owner.id).await?;
            let rows: Vec<ItemRow> = items.iter().map(|i| ItemRow::new(i, now)).collect();
            output::print_list(&rows, format);
        }
        ItemCommand::Remove { user, id } => {
            let owner = inventory.find_user(user).await?;
            let ctx = RequestContext::new(owner.id, owner.email, now);
            inventory.remove_item(&ctx, *id).await?;
            output::print_success(&format!("Item {id} removed"));
        }
    }

    Ok(())
}
