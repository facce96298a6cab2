//! Shared value types used across crate boundaries.

pub mod id;
pub mod message;

pub use id::{ItemId, NotificationId, UserId};
pub use message::OutboundMessage;
