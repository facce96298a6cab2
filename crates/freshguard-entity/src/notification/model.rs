//! Notification entity model.

use chrono::{DateTime, NaiveDate, Utc};
use freshguard_core::types::{ItemId, NotificationId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::kind::NotificationKind;

/// An in-app notification owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// The recipient user.
    pub user_id: UserId,
    /// Originating item. Cleared when the item is deleted.
    pub item_id: Option<ItemId>,
    /// Notification type.
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: NotificationKind,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Whether the user has read this notification.
    pub is_read: bool,
    /// When the notification was first read.
    pub read_at: Option<DateTime<Utc>>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
    /// UTC calendar day of `created_at`; part of the uniqueness key.
    #[serde(skip_serializing, default = "default_dedup_day")]
    pub dedup_day: NaiveDate,
}

fn default_dedup_day() -> NaiveDate {
    NaiveDate::MIN
}

impl Notification {
    /// Check if the notification has not been read yet.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }
}

/// Data required to persist a new notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNotification {
    /// The recipient user.
    pub user_id: UserId,
    /// Originating item.
    pub item_id: Option<ItemId>,
    /// Notification type.
    pub kind: NotificationKind,
    /// Title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Creation instant; `dedup_day` is derived from it.
    pub created_at: DateTime<Utc>,
}

impl NewNotification {
    /// UTC calendar day used by the uniqueness constraint.
    pub fn dedup_day(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    /// Materialize the row with a fresh identifier.
    pub fn into_notification(self) -> Notification {
        let dedup_day = self.dedup_day();
        Notification {
            id: NotificationId::new(),
            user_id: self.user_id,
            item_id: self.item_id,
            kind: self.kind,
            title: self.title,
            message: self.message,
            is_read: false,
            read_at: None,
            created_at: self.created_at,
            dedup_day,
        }
    }
}
