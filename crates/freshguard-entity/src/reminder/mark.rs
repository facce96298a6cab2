//! Reminder mark entity.

use chrono::{DateTime, Utc};
use freshguard_core::types::ItemId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::channel::ReminderChannel;
use crate::notification::NotificationKind;

/// The last time a reminder of `kind` was delivered for an item on a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ReminderMark {
    /// Item the reminder was about.
    pub item_id: ItemId,
    /// Channel it was delivered on.
    pub channel: ReminderChannel,
    /// Notification type.
    pub kind: NotificationKind,
    /// Delivery instant.
    pub last_notified_at: DateTime<Utc>,
}
