//! Scheduled job bodies.

pub mod expiry;

pub use expiry::ExpiryScanTask;
