//! # freshguard-core
//!
//! Core crate for FreshGuard. Contains configuration schemas, typed
//! identifiers, the clock and dispatcher seams, the outbound message type,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other FreshGuard crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
