//! Notification type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a notification is about. Together with the originating item it
/// identifies "the same concern" for deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// The item expires within the lookahead horizon.
    ExpiryWarning,
    /// The item is past its expiry date.
    Expired,
    /// Stock is running low. Reserved; never produced by the expiry scan.
    LowStock,
}

impl NotificationKind {
    /// Return the kind as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExpiryWarning => "expiry_warning",
            Self::Expired => "expired",
            Self::LowStock => "low_stock",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = freshguard_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "expiry_warning" => Ok(Self::ExpiryWarning),
            "expired" => Ok(Self::Expired),
            "low_stock" => Ok(Self::LowStock),
            _ => Err(freshguard_core::AppError::validation(format!(
                "Invalid notification type: '{s}'. Expected one of: expiry_warning, expired, low_stock"
            ))),
        }
    }
}
