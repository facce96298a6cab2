//! Per-user inventory counts by freshness.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use freshguard_core::error::AppError;
use freshguard_core::traits::Clock;
use freshguard_database::store::ItemStore;

use super::classifier::{FreshnessStatus, classify};
use crate::context::RequestContext;

/// Item counts per derived status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStats {
    /// All items.
    pub total: u64,
    /// More than three days left.
    pub fresh: u64,
    /// Expiring within three days.
    pub expiring_soon: u64,
    /// Past expiry.
    pub expired: u64,
}

/// Fold expiry timestamps into counts as seen at `now`.
pub fn compute_stats<I>(expiries: I, now: DateTime<Utc>) -> ItemStats
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    expiries
        .into_iter()
        .fold(ItemStats::default(), |mut stats, expiry| {
            stats.total += 1;
            match classify(expiry, now) {
                FreshnessStatus::Fresh => stats.fresh += 1,
                FreshnessStatus::ExpiringSoon { .. } => stats.expiring_soon += 1,
                FreshnessStatus::Expired { .. } => stats.expired += 1,
            }
            stats
        })
}

/// Computes stats for the requesting user.
#[derive(Debug, Clone)]
pub struct StatsService {
    items: Arc<dyn ItemStore>,
    clock: Arc<dyn Clock>,
}

impl StatsService {
    /// Creates a new stats service.
    pub fn new(items: Arc<dyn ItemStore>, clock: Arc<dyn Clock>) -> Self {
        Self { items, clock }
    }

    /// Counts the caller's items by freshness.
    pub async fn user_stats(&self, ctx: &RequestContext) -> Result<ItemStats, AppError> {
        let items = self.items.find_items_by_user(ctx.user_id).await?;
        Ok(compute_stats(
            items.iter().map(|item| item.expiry_date),
            self.clock.now(),
        ))
    }
}
