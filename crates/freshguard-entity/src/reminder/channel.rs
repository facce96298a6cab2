//! Reminder delivery channel enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A channel over which a reminder can be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "reminder_channel", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReminderChannel {
    /// A persisted notification shown in the dashboard.
    InApp,
    /// An outbound email to the item owner.
    Email,
}

impl ReminderChannel {
    /// Return the channel as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InApp => "in_app",
            Self::Email => "email",
        }
    }
}

impl fmt::Display for ReminderChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
