//! # freshguard-database
//!
//! Store traits for users, items, notifications and the reminder ledger,
//! with a PostgreSQL implementation and a process-local in-memory one.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{ItemStore, NotificationStore, ReminderMarkStore, Stores, UserStore};
