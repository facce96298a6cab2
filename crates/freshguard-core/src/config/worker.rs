//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Scheduled expiry scan configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the scheduler is started with the server.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Six-field cron expression (with seconds) for the all-users scan.
    #[serde(default = "default_expiry_scan_cron")]
    pub expiry_scan_cron: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            expiry_scan_cron: default_expiry_scan_cron(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_expiry_scan_cron() -> String {
    "0 0 8 * * *".to_string()
}
