//! # freshguard-api
//!
//! HTTP surface for FreshGuard built on Axum: the scan triggers, the
//! notification inbox, item stats and health.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_state, run_server};
pub use router::build_router;
pub use error::ApiError;
pub use state::AppState;
