//! Shared-secret check for the scheduled trigger.

use sha2::{Digest, Sha256};
use tracing::debug;

use freshguard_core::config::CronConfig;
use freshguard_core::error::AppError;

/// The configured cron secret, stored as a SHA-256 digest.
#[derive(Clone)]
pub struct CronSecret {
    digest: Option<[u8; 32]>,
}

impl std::fmt::Debug for CronSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronSecret")
            .field("configured", &self.digest.is_some())
            .finish()
    }
}

impl CronSecret {
    /// Build from configuration. An empty secret counts as unset.
    pub fn new(config: &CronConfig) -> Self {
        let digest = config
            .secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(hash);
        Self { digest }
    }

    /// Whether a secret is configured at all.
    pub fn is_configured(&self) -> bool {
        self.digest.is_some()
    }

    /// Verify a presented secret. Comparison runs over fixed-length digests
    /// and does not short-circuit. Always fails when no secret is configured.
    pub fn verify(&self, presented: Option<&str>) -> Result<(), AppError> {
        let Some(expected) = self.digest else {
            debug!("Cron request rejected: no secret configured");
            return Err(AppError::authentication("Unauthorized"));
        };
        let Some(presented) = presented else {
            debug!("Cron request rejected: missing bearer secret");
            return Err(AppError::authentication("Unauthorized"));
        };

        let actual = hash(presented);
        let diff = expected
            .iter()
            .zip(actual.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b));
        if diff == 0 {
            Ok(())
        } else {
            debug!("Cron request rejected: secret mismatch");
            Err(AppError::authentication("Unauthorized"))
        }
    }
}

fn hash(value: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(value.as_bytes()));
    out
}
