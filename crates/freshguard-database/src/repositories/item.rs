//! Item repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use freshguard_core::error::{AppError, ErrorKind};
use freshguard_core::result::AppResult;
use freshguard_core::types::{ItemId, UserId};
use freshguard_entity::item::{Item, NewItem, ReminderCandidate};

use super::insert_error;
use crate::store::ItemStore;

/// Repository for item rows.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: PgPool,
}

impl ItemRepository {
    /// Create a new item repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemStore for ItemRepository {
    async fn create_item(
        &self,
        user_id: UserId,
        new: &NewItem,
        now: DateTime<Utc>,
    ) -> AppResult<Item> {
        sqlx::query_as::<_, Item>(
            "INSERT INTO items (id, user_id, name, category, purchase_date, expiry_date, location, \
             quantity, unit, notes, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11) RETURNING *",
        )
        .bind(ItemId::new())
        .bind(user_id)
        .bind(&new.name)
        .bind(&new.category)
        .bind(new.purchase_date)
        .bind(new.expiry_date)
        .bind(&new.location)
        .bind(new.quantity)
        .bind(&new.unit)
        .bind(&new.notes)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| insert_error("Failed to create item", e))
    }

    async fn find_items_by_user(&self, user_id: UserId) -> AppResult<Vec<Item>> {
        sqlx::query_as::<_, Item>(
            "SELECT * FROM items WHERE user_id = $1 ORDER BY expiry_date ASC, id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list items", e))
    }

    async fn find_candidates(
        &self,
        scope: Option<UserId>,
        horizon: DateTime<Utc>,
    ) -> AppResult<Vec<ReminderCandidate>> {
        sqlx::query_as::<_, ReminderCandidate>(
            "SELECT i.id AS item_id, i.user_id, i.name, i.expiry_date, \
                    u.email AS owner_email, u.name AS owner_name \
             FROM items i JOIN users u ON u.id = i.user_id \
             WHERE i.expiry_date <= $1 AND ($2::uuid IS NULL OR i.user_id = $2) \
             ORDER BY i.expiry_date ASC, i.id ASC",
        )
        .bind(horizon)
        .bind(scope)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load reminder candidates", e)
        })
    }

    async fn delete_item(&self, id: ItemId, user_id: UserId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete item", e))?;
        Ok(result.rows_affected() > 0)
    }
}
