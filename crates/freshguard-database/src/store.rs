//! Store traits implemented by the PostgreSQL repositories and by
//! [`MemoryStore`](crate::memory::MemoryStore).
//!
//! Every query that reads or mutates user-owned rows takes the owning
//! `UserId`, so a row owned by someone else behaves exactly like a missing
//! one.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use freshguard_core::result::AppResult;
use freshguard_core::types::{ItemId, NotificationId, UserId};
use freshguard_entity::item::{Item, NewItem, ReminderCandidate};
use freshguard_entity::notification::{NewNotification, Notification, NotificationKind};
use freshguard_entity::reminder::ReminderChannel;
use freshguard_entity::user::{NewUser, User};

use crate::memory::MemoryStore;
use crate::repositories::{
    ItemRepository, NotificationRepository, ReminderMarkRepository, UserRepository,
};

/// User lookups and creation.
#[async_trait]
pub trait UserStore: Send + Sync + Debug {
    /// Create a user. Fails with `Conflict` when the email is taken.
    async fn create_user(&self, new: &NewUser, now: DateTime<Utc>) -> AppResult<User>;

    /// Find a user by id.
    async fn find_user(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by email address.
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;
}

/// Item reads used by the scan and stats, plus creation for seeding.
#[async_trait]
pub trait ItemStore: Send + Sync + Debug {
    /// Create an item owned by `user_id`.
    async fn create_item(
        &self,
        user_id: UserId,
        new: &NewItem,
        now: DateTime<Utc>,
    ) -> AppResult<Item>;

    /// All items owned by `user_id`, soonest expiry first.
    async fn find_items_by_user(&self, user_id: UserId) -> AppResult<Vec<Item>>;

    /// Items expiring at or before `horizon`, joined with the owner's
    /// address, soonest expiry first. `scope` restricts to one owner.
    async fn find_candidates(
        &self,
        scope: Option<UserId>,
        horizon: DateTime<Utc>,
    ) -> AppResult<Vec<ReminderCandidate>>;

    /// Delete an item. Returns `false` when it does not exist for `user_id`.
    async fn delete_item(&self, id: ItemId, user_id: UserId) -> AppResult<bool>;
}

/// The reminder ledger: last delivery per (item, channel, kind).
#[async_trait]
pub trait ReminderMarkStore: Send + Sync + Debug {
    /// Last delivery instant, if any.
    async fn last_notified(
        &self,
        item_id: ItemId,
        channel: ReminderChannel,
        kind: NotificationKind,
    ) -> AppResult<Option<DateTime<Utc>>>;

    /// Insert or overwrite the mark.
    async fn record_mark(
        &self,
        item_id: ItemId,
        channel: ReminderChannel,
        kind: NotificationKind,
        at: DateTime<Utc>,
    ) -> AppResult<()>;
}

/// In-app notification persistence.
#[async_trait]
pub trait NotificationStore: Send + Sync + Debug {
    /// Persist a notification. Fails with `Conflict` when one already exists
    /// for the same user, item, kind and UTC day.
    async fn create_notification(&self, new: NewNotification) -> AppResult<Notification>;

    /// A user's notifications, newest first.
    async fn find_notifications_by_user(&self, user_id: UserId) -> AppResult<Vec<Notification>>;

    /// Number of unread notifications for a user.
    async fn count_unread(&self, user_id: UserId) -> AppResult<i64>;

    /// Mark read, keeping an existing `read_at`. `None` when not found.
    async fn mark_read(
        &self,
        id: NotificationId,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> AppResult<Option<Notification>>;

    /// Delete a notification. Returns `false` when not found.
    async fn delete_notification(&self, id: NotificationId, user_id: UserId) -> AppResult<bool>;
}

/// The full set of stores, shared by services.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Users.
    pub users: Arc<dyn UserStore>,
    /// Items.
    pub items: Arc<dyn ItemStore>,
    /// Reminder ledger.
    pub marks: Arc<dyn ReminderMarkStore>,
    /// Notifications.
    pub notifications: Arc<dyn NotificationStore>,
}

impl Stores {
    /// Stores backed by PostgreSQL.
    pub fn postgres(pool: sqlx::PgPool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            items: Arc::new(ItemRepository::new(pool.clone())),
            marks: Arc::new(ReminderMarkRepository::new(pool.clone())),
            notifications: Arc::new(NotificationRepository::new(pool)),
        }
    }

    /// Stores backed by a single [`MemoryStore`].
    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self {
            users: store.clone(),
            items: store.clone(),
            marks: store.clone(),
            notifications: store,
        }
    }
}
