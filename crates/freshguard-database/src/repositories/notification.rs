//! Notification repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use freshguard_core::error::{AppError, ErrorKind};
use freshguard_core::result::AppResult;
use freshguard_core::types::{NotificationId, UserId};
use freshguard_entity::notification::{NewNotification, Notification};

use super::insert_error;
use crate::store::NotificationStore;

/// Repository for notification CRUD operations.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn create_notification(&self, new: NewNotification) -> AppResult<Notification> {
        let dedup_day = new.dedup_day();
        sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (id, user_id, item_id, \"type\", title, message, is_read, \
             created_at, dedup_day) \
             VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7, $8) RETURNING *",
        )
        .bind(NotificationId::new())
        .bind(new.user_id)
        .bind(new.item_id)
        .bind(new.kind)
        .bind(&new.title)
        .bind(&new.message)
        .bind(new.created_at)
        .bind(dedup_day)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| insert_error("Failed to create notification", e))
    }

    async fn find_notifications_by_user(&self, user_id: UserId) -> AppResult<Vec<Notification>> {
        sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list notifications", e))
    }

    async fn count_unread(&self, user_id: UserId) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count unread", e))
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET is_read = TRUE, read_at = COALESCE(read_at, $3) \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .bind(at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark read", e))
    }

    async fn delete_notification(&self, id: NotificationId, user_id: UserId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete notification", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
