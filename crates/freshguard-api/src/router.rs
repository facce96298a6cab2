//! Route definitions for the FreshGuard HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, patch, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(cron_routes())
        .merge(notification_routes())
        .merge(item_routes())
        .merge(health_routes());

    let cors = middleware::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::request_logging,
        ))
        .with_state(state)
}

/// Scheduled trigger, guarded by the cron secret
fn cron_routes() -> Router<AppState> {
    Router::new().route("/cron/expiry-check", get(handlers::cron::expiry_check))
}

/// Notification inbox and the per-user scan trigger
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications),
        )
        .route(
            "/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/check-expiry",
            post(handlers::notification::check_expiry),
        )
        .route(
            "/notifications/{id}",
            patch(handlers::notification::mark_read)
                .delete(handlers::notification::delete_notification),
        )
}

/// Item stats
fn item_routes() -> Router<AppState> {
    Router::new().route("/items/stats", get(handlers::stats::item_stats))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
