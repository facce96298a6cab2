//! Scheduled background work for FreshGuard.
//!
//! - [`CronScheduler`] fires the all-users expiry scan on a cron expression
//! - [`ExpiryScanTask`] runs one scan per tick and skips overlapping ticks

pub mod jobs;
pub mod scheduler;

pub use jobs::ExpiryScanTask;
pub use scheduler::CronScheduler;
