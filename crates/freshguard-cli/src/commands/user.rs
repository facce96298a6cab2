//! User management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use freshguard_core::config::AppConfig;
use freshguard_core::error::AppError;
use freshguard_entity::user::{NewUser, User};

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create a user
    Create {
        /// Email address
        #[arg(long)]
        email: String,
        /// Display name
        #[arg(long)]
        name: String,
    },
    /// Show a user by id or email
    Show {
        /// User id or email
        user: String,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Email
    email: String,
    /// Name
    name: String,
    /// Created at
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            email: u.email.clone(),
            name: u.name.clone(),
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let (stores, _pool) = super::open_stores(config).await?;
    let inventory = super::inventory(&stores);

    match &args.command {
        UserCommand::Create { email, name } => {
            let user = inventory
                .register_user(&NewUser {
                    email: email.clone(),
                    name: name.clone(),
                })
                .await?;
            output::print_success(&format!("User '{}' created", user.email));
            output::print_item(&UserRow::from(&user), format);
        }
        UserCommand::Show { user } => {
            let user = inventory.find_user(user).await?;
            output::print_item(&UserRow::from(&user), format);
        }
    }

    Ok(())
}
