//! The expiry reminder scan.

pub mod result;
pub mod scan;
pub mod template;

pub use result::{ChannelOutcome, FailureKind, ItemFailure, ItemOutcome, NotifiedItem, ScanResult};
pub use scan::{ExpiryScanJob, ScanOptions, ScanScope};
pub use template::{InAppText, ReminderTemplates};
