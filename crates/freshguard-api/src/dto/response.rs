//! Response DTOs.

use serde::Serialize;

use freshguard_entity::notification::Notification;
use freshguard_service::ScanResult;
use freshguard_service::reminder::{ItemFailure, NotifiedItem};

/// Standard success response wrapper. The payload fields sit next to
/// `success` in the body.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Count response.
#[derive(Debug, Clone, Serialize)]
pub struct CountResponse {
    /// Count value.
    pub count: i64,
}

/// Inbox listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationListResponse {
    /// Notifications, newest first.
    pub notifications: Vec<Notification>,
    /// Unread notification count.
    pub unread_count: i64,
}

/// Result of the all-users scheduled scan.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CronScanResponse {
    /// Candidates examined.
    pub items_processed: usize,
    /// In-app notifications created.
    pub notifications_created: usize,
    /// Emails sent.
    pub emails_sent: usize,
    /// Emails that failed to send.
    pub emails_failed: usize,
    /// Items that could not be processed.
    pub failed: Vec<ItemFailure>,
    /// Whether the scan deadline elapsed.
    pub timed_out: bool,
}

impl From<ScanResult> for CronScanResponse {
    fn from(result: ScanResult) -> Self {
        Self {
            items_processed: result.items_scanned,
            notifications_created: result.notifications_created,
            emails_sent: result.emails_sent,
            emails_failed: result.emails_failed,
            failed: result.failures,
            timed_out: result.timed_out,
        }
    }
}

/// Result of a scan over the caller's own items.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckExpiryResponse {
    /// In-app notifications created.
    pub notifications_created: usize,
    /// Candidates examined.
    pub items_checked: usize,
    /// Items that got a new notification.
    pub notified_items: Vec<NotifiedItem>,
    /// Emails sent.
    pub emails_sent: usize,
    /// Emails that failed to send.
    pub emails_failed: usize,
    /// Items that could not be processed.
    pub failed: Vec<ItemFailure>,
    /// Whether the scan deadline elapsed.
    pub timed_out: bool,
}

impl From<ScanResult> for CheckExpiryResponse {
    fn from(result: ScanResult) -> Self {
        Self {
            notifications_created: result.notifications_created,
            items_checked: result.items_scanned,
            notified_items: result.notified_items,
            emails_sent: result.emails_sent,
            emails_failed: result.emails_failed,
            failed: result.failures,
            timed_out: result.timed_out,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Active persistence backend.
    pub store: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
}
