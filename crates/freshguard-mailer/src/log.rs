//! Dispatcher that only logs.

use async_trait::async_trait;
use tracing::info;

use freshguard_core::result::AppResult;
use freshguard_core::traits::Dispatcher;
use freshguard_core::types::OutboundMessage;

/// Logs each message at info level and reports success.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDispatcher;

#[async_trait]
impl Dispatcher for LogDispatcher {
    fn channel(&self) -> &str {
        "log"
    }

    async fn send(&self, message: &OutboundMessage) -> AppResult<()> {
        info!(
            to = %message.to,
            subject = %message.subject,
            "Email delivery disabled; reminder logged"
        );
        Ok(())
    }
}
