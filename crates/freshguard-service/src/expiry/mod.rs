//! Freshness classification, reminder due-ness and inventory stats.

pub mod classifier;
pub mod dedup;
pub mod stats;

pub use classifier::{DAY_MS, FreshnessStatus, LOOKAHEAD_DAYS, classify, lookahead_horizon};
pub use dedup::{DEDUP_WINDOW_HOURS, is_due};
pub use stats::{ItemStats, StatsService, compute_stats};
