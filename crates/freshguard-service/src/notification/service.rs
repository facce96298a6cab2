//! Notification inbox operations scoped to the requesting user.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use freshguard_core::error::AppError;
use freshguard_core::traits::Clock;
use freshguard_core::types::NotificationId;
use freshguard_database::store::NotificationStore;
use freshguard_entity::notification::Notification;

use crate::context::RequestContext;

/// A user's notifications with the unread count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inbox {
    /// Notifications, newest first.
    pub notifications: Vec<Notification>,
    /// Number of unread notifications.
    pub unread_count: i64,
}

/// Manages a user's in-app notifications.
#[derive(Debug, Clone)]
pub struct NotificationService {
    store: Arc<dyn NotificationStore>,
    clock: Arc<dyn Clock>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(store: Arc<dyn NotificationStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Lists the caller's notifications with their unread count.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Inbox, AppError> {
        let notifications = self.store.find_notifications_by_user(ctx.user_id).await?;
        let unread_count = notifications.iter().filter(|n| n.is_unread()).count() as i64;
        Ok(Inbox {
            notifications,
            unread_count,
        })
    }

    /// Gets the unread notification count.
    pub async fn unread_count(&self, ctx: &RequestContext) -> Result<i64, AppError> {
        self.store.count_unread(ctx.user_id).await
    }

    /// Marks a notification as read. Reading an already-read notification
    /// succeeds and leaves it unchanged.
    pub async fn mark_read(
        &self,
        ctx: &RequestContext,
        id: NotificationId,
    ) -> Result<Notification, AppError> {
        self.store
            .mark_read(id, ctx.user_id, self.clock.now())
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))
    }

    /// Deletes a notification.
    pub async fn delete(&self, ctx: &RequestContext, id: NotificationId) -> Result<(), AppError> {
        if !self.store.delete_notification(id, ctx.user_id).await? {
            return Err(AppError::not_found("Notification not found"));
        }
        info!(user_id = %ctx.user_id, notification_id = %id, "Notification deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use freshguard_core::error::ErrorKind;
    use freshguard_core::traits::ManualClock;
    use freshguard_core::types::UserId;
    use freshguard_database::MemoryStore;
    use freshguard_entity::notification::{NewNotification, NotificationKind};

    use super::*;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 1, 8, 0, 0).unwrap()
    }

    fn ctx(user_id: UserId) -> RequestContext {
        RequestContext::new(user_id, "u@example.com".into(), start())
    }

    async fn setup() -> (NotificationService, Arc<MemoryStore>, Arc<ManualClock>, Notification) {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(start()));
        let owner = UserId::new();
        let row = store
            .create_notification(NewNotification {
                user_id: owner,
                item_id: None,
                kind: NotificationKind::ExpiryWarning,
                title: "Milk expiring soon".into(),
                message: "Milk expires tomorrow! Make sure to use it soon.".into(),
                created_at: start(),
            })
            .await
            .expect("seed");
        let service = NotificationService::new(store.clone(), clock.clone());
        (service, store, clock, row)
    }

    #[tokio::test]
    async fn test_mark_read_is_idempotent() {
        let (service, _, clock, row) = setup().await;
        let owner = ctx(row.user_id);

        clock.advance(Duration::minutes(5));
        let first = service.mark_read(&owner, row.id).await.expect("first");
        clock.advance(Duration::hours(2));
        let second = service.mark_read(&owner, row.id).await.expect("second");

        assert!(second.is_read);
        assert_eq!(first.read_at, Some(start() + Duration::minutes(5)));
        assert_eq!(second.read_at, first.read_at);
        assert_eq!(second.created_at, row.created_at);
        assert_eq!(second.message, row.message);
        assert_eq!(service.unread_count(&owner).await.expect("count"), 0);
    }

    #[tokio::test]
    async fn test_foreign_and_missing_look_identical() {
        let (service, _, _, row) = setup().await;
        let stranger = ctx(UserId::new());

        let foreign = service.mark_read(&stranger, row.id).await.expect_err("foreign");
        let missing = service
            .mark_read(&ctx(row.user_id), NotificationId::new())
            .await
            .expect_err("missing");
        assert_eq!(foreign.kind, ErrorKind::NotFound);
        assert_eq!(foreign.kind, missing.kind);
        assert_eq!(foreign.message, missing.message);

        let foreign = service.delete(&stranger, row.id).await.expect_err("foreign");
        assert_eq!(foreign.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_then_delete_again_is_not_found() {
        let (service, store, _, row) = setup().await;
        let owner = ctx(row.user_id);

        service.delete(&owner, row.id).await.expect("delete");
        assert_eq!(store.notification_count(), 0);
        let err = service.delete(&owner, row.id).await.expect_err("gone");
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_list_reports_unread_count() {
        let (service, _, _, row) = setup().await;
        let inbox = service.list(&ctx(row.user_id)).await.expect("list");
        assert_eq!(inbox.notifications.len(), 1);
        assert_eq!(inbox.unread_count, 1);

        let empty = service.list(&ctx(UserId::new())).await.expect("list");
        assert!(empty.notifications.is_empty());
        assert_eq!(empty.unread_count, 0);
    }
}
