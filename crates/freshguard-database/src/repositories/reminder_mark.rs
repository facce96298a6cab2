//! Reminder ledger repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use freshguard_core::error::{AppError, ErrorKind};
use freshguard_core::result::AppResult;
use freshguard_core::types::ItemId;
use freshguard_entity::notification::NotificationKind;
use freshguard_entity::reminder::ReminderChannel;

use crate::store::ReminderMarkStore;

/// Repository for `reminder_marks` rows.
#[derive(Debug, Clone)]
pub struct ReminderMarkRepository {
    pool: PgPool,
}

impl ReminderMarkRepository {
    /// Create a new reminder mark repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReminderMarkStore for ReminderMarkRepository {
    async fn last_notified(
        &self,
        item_id: ItemId,
        channel: ReminderChannel,
        kind: NotificationKind,
    ) -> AppResult<Option<DateTime<Utc>>> {
        sqlx::query_scalar::<_, DateTime<Utc>>(
            "SELECT last_notified_at FROM reminder_marks \
             WHERE item_id = $1 AND channel = $2 AND kind = $3",
        )
        .bind(item_id)
        .bind(channel)
        .bind(kind)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read reminder mark", e))
    }

    async fn record_mark(
        &self,
        item_id: ItemId,
        channel: ReminderChannel,
        kind: NotificationKind,
        at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO reminder_marks (item_id, channel, kind, last_notified_at) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (item_id, channel, kind) \
             DO UPDATE SET last_notified_at = EXCLUDED.last_notified_at",
        )
        .bind(item_id)
        .bind(channel)
        .bind(kind)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record reminder mark", e)
        })?;
        Ok(())
    }
}
