//! In-memory dispatcher for tests and dry runs.

use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use freshguard_core::error::AppError;
use freshguard_core::result::AppResult;
use freshguard_core::traits::Dispatcher;
use freshguard_core::types::OutboundMessage;

/// Records delivered messages. Recipients registered with
/// [`fail_for`](Self::fail_for) get a `Dispatch` error instead, and sends to
/// recipients registered with [`hang_for`](Self::hang_for) never complete.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    sent: Mutex<Vec<OutboundMessage>>,
    failing: Mutex<HashSet<String>>,
    hanging: Mutex<HashSet<String>>,
    delay: Option<Duration>,
}

impl RecordingDispatcher {
    /// Create a dispatcher that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep for `delay` before every send.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Make sends to `recipient` fail.
    pub fn fail_for(&self, recipient: &str) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.insert(recipient.to_string());
        }
    }

    /// Make sends to `recipient` hang until the caller gives up.
    pub fn hang_for(&self, recipient: &str) {
        if let Ok(mut hanging) = self.hanging.lock() {
            hanging.insert(recipient.to_string());
        }
    }

    /// Let sends to `recipient` succeed again.
    pub fn recover(&self, recipient: &str) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.remove(recipient);
        }
    }

    /// Messages delivered so far.
    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Dispatcher for RecordingDispatcher {
    fn channel(&self) -> &str {
        "recording"
    }

    async fn send(&self, message: &OutboundMessage) -> AppResult<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let hangs = self
            .hanging
            .lock()
            .map(|h| h.contains(&message.to))
            .unwrap_or(false);
        if hangs {
            std::future::pending::<()>().await;
        }

        let fails = self
            .failing
            .lock()
            .map(|f| f.contains(&message.to))
            .unwrap_or(false);
        if fails {
            return Err(AppError::dispatch(format!(
                "Recipient {} rejected the message",
                message.to
            )));
        }

        self.sent
            .lock()
            .map_err(|_| AppError::internal("Recording dispatcher lock poisoned"))?
            .push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use freshguard_core::error::ErrorKind;

    use super::*;

    #[tokio::test]
    async fn test_records_and_fails_per_recipient() {
        let dispatcher = RecordingDispatcher::new();
        dispatcher.fail_for("bad@example.com");

        dispatcher
            .send(&OutboundMessage::text("ok@example.com", "s", "b"))
            .await
            .expect("delivered");
        let err = dispatcher
            .send(&OutboundMessage::text("bad@example.com", "s", "b"))
            .await
            .expect_err("rejected");
        assert_eq!(err.kind, ErrorKind::Dispatch);

        dispatcher.recover("bad@example.com");
        dispatcher
            .send(&OutboundMessage::text("bad@example.com", "s", "b"))
            .await
            .expect("recovered");
        assert_eq!(dispatcher.sent().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_recipient_never_completes() {
        let dispatcher = RecordingDispatcher::new();
        dispatcher.hang_for("slow@example.com");

        let message = OutboundMessage::text("slow@example.com", "s", "b");
        let waited =
            tokio::time::timeout(Duration::from_secs(60), dispatcher.send(&message)).await;

        assert!(waited.is_err());
        assert!(dispatcher.sent().is_empty());
    }
}
