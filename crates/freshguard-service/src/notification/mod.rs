//! Notification inbox management.

pub mod service;

pub use service::NotificationService;
