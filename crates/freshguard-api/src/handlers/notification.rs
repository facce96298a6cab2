//! Notification handlers.

use axum::Json;
use axum::extract::{Path, State};

use freshguard_core::types::NotificationId;
use freshguard_entity::notification::Notification;
use freshguard_service::ScanScope;

use crate::dto::response::{
    ApiResponse, CheckExpiryResponse, CountResponse, MessageResponse, NotificationListResponse,
};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::extractors::path::parse_id;
use crate::state::AppState;

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<NotificationListResponse>>, ApiError> {
    let inbox = state.notification_service.list(&auth).await?;
    Ok(Json(ApiResponse::ok(NotificationListResponse {
        notifications: inbox.notifications,
        unread_count: inbox.unread_count,
    })))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let count = state.notification_service.unread_count(&auth).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}

/// PATCH /api/notifications/{id}
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Notification>>, ApiError> {
    let id: NotificationId = parse_id(&id)?;
    let notification = state.notification_service.mark_read(&auth, id).await?;
    Ok(Json(ApiResponse::ok(notification)))
}

/// DELETE /api/notifications/{id}
pub async fn delete_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id: NotificationId = parse_id(&id)?;
    state.notification_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Notification deleted".to_string(),
    })))
}

/// POST /api/notifications/check-expiry
pub async fn check_expiry(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<CheckExpiryResponse>>, ApiError> {
    let result = state
        .scan_job
        .run(ScanScope::User(auth.user_id), auth.request_time)
        .await?;
    Ok(Json(ApiResponse::ok(result.into())))
}
