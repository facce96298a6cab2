//! # freshguard-auth
//!
//! Verification of the credentials FreshGuard accepts.
//!
//! - `jwt`: HS256 session tokens carrying the user id and email
//! - `cron`: shared-secret check for the scheduled trigger

pub mod cron;
pub mod jwt;

pub use cron::CronSecret;
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
