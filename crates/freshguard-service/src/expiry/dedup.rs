//! Reminder due-ness.
//!
//! One rule for every channel: remind about a non-fresh item unless the
//! same (item, channel, kind) was delivered within the last 24 hours.

use chrono::{DateTime, Duration, Utc};

use super::classifier::FreshnessStatus;

/// Minimum spacing between two reminders about the same concern.
pub const DEDUP_WINDOW_HOURS: i64 = 24;

/// Whether a reminder is due. A `last_notified_at` in the future counts as
/// not yet elapsed.
pub fn is_due(
    last_notified_at: Option<DateTime<Utc>>,
    status: &FreshnessStatus,
    now: DateTime<Utc>,
) -> bool {
    if !status.needs_attention() {
        return false;
    }
    match last_notified_at {
        None => true,
        Some(last) => now - last >= Duration::hours(DEDUP_WINDOW_HOURS),
    }
}
