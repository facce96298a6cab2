//! Account and item registration.

pub mod service;

pub use service::InventoryService;
