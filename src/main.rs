//! FreshGuard server: expiry tracking and reminders.
//!
//! Loads configuration, initialises logging and serves the HTTP API with
//! the scheduled expiry scan.

use tracing_subscriber::{EnvFilter, fmt};

use freshguard_core::config::{AppConfig, LogFormat};

#[tokio::main]
async fn main() {
    let env = std::env::var("FRESHGUARD_ENV").unwrap_or_else(|_| "default".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Starting FreshGuard v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = freshguard_api::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
