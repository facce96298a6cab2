//! Item stats handler.

use axum::Json;
use axum::extract::State;

use freshguard_service::ItemStats;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/items/stats
pub async fn item_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<ItemStats>>, ApiError> {
    let stats = state.stats_service.user_stats(&auth).await?;
    Ok(Json(ApiResponse::ok(stats)))
}
