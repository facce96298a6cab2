//! Reminder ledger entities.

pub mod channel;
pub mod mark;

pub use channel::ReminderChannel;
pub use mark::ReminderMark;
