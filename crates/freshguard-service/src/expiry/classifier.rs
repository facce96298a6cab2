//! Freshness classification.
//!
//! An item's status is a function of `expiry - now` only. It is never
//! stored; every caller classifies against its own clock reading.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use freshguard_entity::notification::NotificationKind;

/// Length of a day in milliseconds.
pub const DAY_MS: i64 = 86_400_000;

/// Items expiring within this many days are "expiring soon".
pub const LOOKAHEAD_DAYS: i64 = 3;

/// Derived freshness of an item at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FreshnessStatus {
    /// More than [`LOOKAHEAD_DAYS`] remain.
    Fresh,
    /// Expires within the lookahead, possibly right now.
    ExpiringSoon {
        /// Whole days left, rounded up. `0` means it expires this instant.
        days_remaining: i64,
    },
    /// Past its expiry.
    Expired {
        /// Whole days since expiry, rounded up. Always at least 1.
        days_overdue: i64,
    },
}

impl FreshnessStatus {
    /// Notification type for a reminder about this status.
    pub fn notification_kind(&self) -> Option<NotificationKind> {
        match self {
            Self::Fresh => None,
            Self::ExpiringSoon { .. } => Some(NotificationKind::ExpiryWarning),
            Self::Expired { .. } => Some(NotificationKind::Expired),
        }
    }

    /// Whether the item needs attention.
    pub fn needs_attention(&self) -> bool {
        !matches!(self, Self::Fresh)
    }

    /// Short label: `fresh`, `expiring_soon` or `expired`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fresh => "fresh",
            Self::ExpiringSoon { .. } => "expiring_soon",
            Self::Expired { .. } => "expired",
        }
    }
}

/// Classify an item expiring at `expiry` as seen at `now`.
pub fn classify(expiry: DateTime<Utc>, now: DateTime<Utc>) -> FreshnessStatus {
    let delta_ms = (expiry - now).num_milliseconds();
    if delta_ms > LOOKAHEAD_DAYS * DAY_MS {
        FreshnessStatus::Fresh
    } else if delta_ms >= 0 {
        FreshnessStatus::ExpiringSoon {
            days_remaining: ceil_days(delta_ms),
        }
    } else {
        FreshnessStatus::Expired {
            days_overdue: ceil_days(-delta_ms),
        }
    }
}

/// Latest expiry that is not `Fresh` at `now`.
pub fn lookahead_horizon(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::milliseconds(LOOKAHEAD_DAYS * DAY_MS)
}

fn ceil_days(ms: i64) -> i64 {
    (ms + DAY_MS - 1) / DAY_MS
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_expiry_equal_to_now_is_expiring_today() {
        assert_eq!(
            classify(now(), now()),
            FreshnessStatus::ExpiringSoon { days_remaining: 0 }
        );
    }

    #[test]
    fn test_lookahead_boundary() {
        assert_eq!(
            classify(now() + Duration::days(3), now()),
            FreshnessStatus::ExpiringSoon { days_remaining: 3 }
        );
        assert_eq!(
            classify(now() + Duration::days(3) + Duration::milliseconds(1), now()),
            FreshnessStatus::Fresh
        );
        assert_eq!(lookahead_horizon(now()), now() + Duration::days(3));
    }

    #[test]
    fn test_partial_days_round_up() {
        assert_eq!(
            classify(now() + Duration::milliseconds(1), now()),
            FreshnessStatus::ExpiringSoon { days_remaining: 1 }
        );
        assert_eq!(
            classify(now() + Duration::hours(36), now()),
            FreshnessStatus::ExpiringSoon { days_remaining: 2 }
        );
        assert_eq!(
            classify(now() - Duration::milliseconds(1), now()),
            FreshnessStatus::Expired { days_overdue: 1 }
        );
        assert_eq!(
            classify(now() - Duration::days(5), now()),
            FreshnessStatus::Expired { days_overdue: 5 }
        );
    }

    #[test]
    fn test_status_only_moves_toward_expired() {
        let expiry = now() + Duration::days(4);
        let rank = |s: FreshnessStatus| match s {
            FreshnessStatus::Fresh => 0,
            FreshnessStatus::ExpiringSoon { .. } => 1,
            FreshnessStatus::Expired { .. } => 2,
        };
        let mut previous = rank(classify(expiry, now()));
        for hour in 1..=24 * 10 {
            let current = rank(classify(expiry, now() + Duration::hours(hour)));
            assert!(current >= previous, "regressed at hour {hour}");
            previous = current;
        }
        assert_eq!(previous, 2);
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(FreshnessStatus::Fresh.notification_kind(), None);
        assert_eq!(
            FreshnessStatus::ExpiringSoon { days_remaining: 1 }.notification_kind(),
            Some(NotificationKind::ExpiryWarning)
        );
        assert_eq!(
            FreshnessStatus::Expired { days_overdue: 2 }.notification_kind(),
            Some(NotificationKind::Expired)
        );
    }
}
