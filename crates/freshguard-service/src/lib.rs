//! # freshguard-service
//!
//! Business logic for FreshGuard. The `expiry` module holds the pure
//! freshness and deduplication rules; `reminder` runs the scan that turns
//! them into notifications and emails; `notification` serves the owner's
//! inbox; `inventory` registers users and items.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod expiry;
pub mod inventory;
pub mod notification;
pub mod reminder;

pub use context::RequestContext;
pub use expiry::{FreshnessStatus, ItemStats, StatsService, classify, compute_stats, is_due};
pub use inventory::InventoryService;
pub use notification::NotificationService;
pub use reminder::{ExpiryScanJob, ReminderTemplates, ScanOptions, ScanResult, ScanScope};
