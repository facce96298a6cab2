//! Custom Axum extractors.

pub mod auth;
pub mod cron;
pub mod path;

pub use auth::AuthUser;
pub use cron::CronAuth;
