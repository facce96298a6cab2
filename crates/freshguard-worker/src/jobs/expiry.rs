//! Scheduled all-users expiry scan.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, info, warn};

use freshguard_core::traits::Clock;
use freshguard_service::reminder::{ExpiryScanJob, ScanResult, ScanScope};

/// Runs [`ExpiryScanJob`] over all users. A tick that arrives while the
/// previous one is still running is skipped.
#[derive(Debug)]
pub struct ExpiryScanTask {
    job: ExpiryScanJob,
    clock: Arc<dyn Clock>,
    running: Mutex<()>,
}

impl ExpiryScanTask {
    /// Creates a new task.
    pub fn new(job: ExpiryScanJob, clock: Arc<dyn Clock>) -> Self {
        Self {
            job,
            clock,
            running: Mutex::new(()),
        }
    }

    /// Run one scan. Returns `None` when skipped or when candidates could
    /// not be loaded.
    pub async fn tick(&self) -> Option<ScanResult> {
        let Ok(_guard) = self.running.try_lock() else {
            warn!("Previous expiry scan still running; skipping this tick");
            return None;
        };

        let now = self.clock.now();
        info!(%now, "Scheduled expiry scan triggered");
        match self.job.run(ScanScope::AllUsers, now).await {
            Ok(result) => Some(result),
            Err(e) => {
                error!(error = %e, "Scheduled expiry scan failed");
                None
            }
        }
    }
}
