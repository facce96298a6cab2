//! Application builder: wires stores, delivery and services into the
//! router, then serves it alongside the expiry scan scheduler.

use std::sync::Arc;

use tracing::{info, warn};

use freshguard_core::config::{AppConfig, DatabaseProvider};
use freshguard_core::error::AppError;
use freshguard_core::traits::{Clock, Dispatcher, SystemClock};
use freshguard_database::{DatabasePool, MemoryStore, Stores};
use freshguard_mailer::{LogDispatcher, SmtpDispatcher};
use freshguard_worker::{CronScheduler, ExpiryScanTask};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the application state for `config`.
///
/// Returns the PostgreSQL pool alongside the state when one was opened so
/// the caller can close it on shutdown.
pub async fn build_state(config: AppConfig) -> Result<(AppState, Option<DatabasePool>), AppError> {
    let (stores, pool) = match config.database.provider {
        DatabaseProvider::Memory => {
            warn!("Using the in-memory store; data is lost on restart");
            (Stores::memory(Arc::new(MemoryStore::new())), None)
        }
        DatabaseProvider::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;
            (Stores::postgres(pool.pool().clone()), Some(pool))
        }
    };

    let dispatcher: Arc<dyn Dispatcher> = if config.email.enabled {
        Arc::new(SmtpDispatcher::new(&config.email)?)
    } else {
        info!("Email delivery disabled; reminder emails will be logged");
        Arc::new(LogDispatcher)
    };

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    Ok((AppState::new(config, stores, dispatcher, clock), pool))
}

/// Runs the FreshGuard server until Ctrl+C or SIGTERM.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    info!("Starting FreshGuard server...");

    let addr = config.server.bind_address();
    let worker_config = config.worker.clone();
    let (state, pool) = build_state(config).await?;

    if !state.cron_secret.is_configured() {
        warn!("No cron secret configured; /api/cron/expiry-check will reject every request");
    }

    let mut scheduler = if worker_config.enabled {
        let task = Arc::new(ExpiryScanTask::new(
            (*state.scan_job).clone(),
            state.clock.clone(),
        ));
        let scheduler = CronScheduler::new(task).await?;
        scheduler.register_expiry_scan(&worker_config).await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        info!("Expiry scan scheduler disabled");
        None
    };

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("FreshGuard server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("Shutting down");
    if let Some(scheduler) = scheduler.as_mut() {
        scheduler.shutdown().await?;
    }
    if let Some(pool) = pool {
        pool.close().await;
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
