//! Session token issuance for local testing of the HTTP API.

use clap::Args;

use freshguard_auth::JwtEncoder;
use freshguard_core::config::AppConfig;
use freshguard_core::error::AppError;

/// Arguments for the token command
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// User id or email
    #[arg(short, long)]
    pub user: String,
}

/// Print a session token for the user
pub async fn execute(args: &TokenArgs, config: &AppConfig) -> Result<(), AppError> {
    let (stores, _pool) = super::open_stores(config).await?;
    let user = super::inventory(&stores).find_user(&args.user).await?;

    let (token, expires_at) =
        JwtEncoder::new(&config.auth).issue(user.id, &user.email, super::clock().now())?;

    println!("{token}");
    eprintln!("expires at {}", expires_at.to_rfc3339());
    Ok(())
}
