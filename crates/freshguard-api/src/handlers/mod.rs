//! Request handlers.

pub mod cron;
pub mod health;
pub mod notification;
pub mod stats;
