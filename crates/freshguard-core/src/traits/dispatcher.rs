//! Outbound delivery channel.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::OutboundMessage;

/// Delivers rendered messages over an external channel such as email.
///
/// Implementations must be safe to call concurrently. A returned error
/// means the message was not accepted by the channel; callers treat it
/// as a per-message failure and may retry on a later scan.
#[async_trait]
pub trait Dispatcher: Send + Sync + Debug {
    /// Short channel name used in logs (e.g. `"smtp"`).
    fn channel(&self) -> &str;

    /// Deliver one message.
    async fn send(&self, message: &OutboundMessage) -> AppResult<()>;
}
