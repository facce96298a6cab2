//! Cron scheduler for the periodic expiry scan.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};

use freshguard_core::config::WorkerConfig;
use freshguard_core::error::AppError;

use crate::jobs::ExpiryScanTask;

/// Cron-based scheduler that triggers [`ExpiryScanTask`].
pub struct CronScheduler {
    scheduler: JobScheduler,
    task: Arc<ExpiryScanTask>,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler.
    pub async fn new(task: Arc<ExpiryScanTask>) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self { scheduler, task })
    }

    /// Register the expiry scan on `config.expiry_scan_cron`.
    pub async fn register_expiry_scan(&self, config: &WorkerConfig) -> Result<(), AppError> {
        let task = Arc::clone(&self.task);
        let job = CronJob::new_async(config.expiry_scan_cron.as_str(), move |_uuid, _lock| {
            let task = Arc::clone(&task);
            Box::pin(async move {
                tracing::debug!("Running scheduled expiry scan");
                task.tick().await;
            })
        })
        .map_err(|e| {
            AppError::configuration(format!(
                "Invalid expiry scan schedule '{}': {e}",
                config.expiry_scan_cron
            ))
        })?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add expiry scan schedule: {e}")))?;

        tracing::info!(schedule = %config.expiry_scan_cron, "Registered: expiry_scan");
        Ok(())
    }

    /// Start the scheduler.
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shut the scheduler down.
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }
}
