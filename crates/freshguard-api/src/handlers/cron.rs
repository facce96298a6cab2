//! Scheduled trigger for the all-users expiry scan.

use axum::Json;
use axum::extract::State;
use tracing::info;

use freshguard_service::ScanScope;

use crate::dto::response::{ApiResponse, CronScanResponse};
use crate::error::ApiError;
use crate::extractors::CronAuth;
use crate::state::AppState;

/// GET /api/cron/expiry-check
pub async fn expiry_check(
    State(state): State<AppState>,
    _auth: CronAuth,
) -> Result<Json<ApiResponse<CronScanResponse>>, ApiError> {
    let result = state
        .scan_job
        .run(ScanScope::AllUsers, state.clock.now())
        .await?;

    info!(
        items = result.items_scanned,
        created = result.notifications_created,
        emails_sent = result.emails_sent,
        emails_failed = result.emails_failed,
        "Cron expiry check completed"
    );

    Ok(Json(ApiResponse::ok(result.into())))
}
