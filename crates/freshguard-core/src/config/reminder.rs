//! Expiry scan tuning.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Bounds applied to a single expiry scan invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// Number of items processed concurrently.
    #[serde(default = "default_concurrency")]
    pub dispatch_concurrency: usize,
    /// Budget for each store call and each dispatch, in seconds.
    #[serde(default = "default_item_timeout")]
    pub item_timeout_seconds: u64,
    /// Overall deadline for a scan, in seconds.
    #[serde(default = "default_scan_deadline")]
    pub scan_deadline_seconds: u64,
}

impl ReminderConfig {
    /// Per-call timeout as a [`Duration`].
    pub fn item_timeout(&self) -> Duration {
        Duration::from_secs(self.item_timeout_seconds)
    }

    /// Scan deadline as a [`Duration`].
    pub fn scan_deadline(&self) -> Duration {
        Duration::from_secs(self.scan_deadline_seconds)
    }
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            dispatch_concurrency: default_concurrency(),
            item_timeout_seconds: default_item_timeout(),
            scan_deadline_seconds: default_scan_deadline(),
        }
    }
}

fn default_concurrency() -> usize {
    5
}

fn default_item_timeout() -> u64 {
    15
}

fn default_scan_deadline() -> u64 {
    300
}
