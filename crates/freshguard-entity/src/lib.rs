//! # freshguard-entity
//!
//! Domain entity models for FreshGuard. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities derive `sqlx::FromRow`; enums map onto PostgreSQL enum types.

pub mod item;
pub mod notification;
pub mod reminder;
pub mod user;
