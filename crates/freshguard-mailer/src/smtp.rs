//! SMTP delivery via lettre.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

use freshguard_core::config::EmailConfig;
use freshguard_core::error::{AppError, ErrorKind};
use freshguard_core::result::AppResult;
use freshguard_core::traits::Dispatcher;
use freshguard_core::types::OutboundMessage;

/// Sends reminders through an SMTP relay using STARTTLS.
#[derive(Clone)]
pub struct SmtpDispatcher {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    relay: String,
}

impl std::fmt::Debug for SmtpDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpDispatcher")
            .field("relay", &self.relay)
            .field("from", &self.from.to_string())
            .finish()
    }
}

impl SmtpDispatcher {
    /// Build a dispatcher from email configuration.
    pub fn new(config: &EmailConfig) -> AppResult<Self> {
        let from: Mailbox = config.from.parse().map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid sender address '{}'", config.from),
                e,
            )
        })?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Invalid SMTP relay '{}'", config.smtp_host),
                    e,
                )
            })?
            .port(config.smtp_port)
            .timeout(Some(Duration::from_secs(config.timeout_seconds)));

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        info!(
            relay = %config.smtp_host,
            port = config.smtp_port,
            "SMTP dispatcher configured"
        );

        Ok(Self {
            transport: builder.build(),
            from,
            relay: config.smtp_host.clone(),
        })
    }

    fn build_message(&self, message: &OutboundMessage) -> AppResult<Message> {
        let to: Mailbox = message.to.parse().map_err(|e| {
            AppError::with_source(
                ErrorKind::Dispatch,
                format!("Invalid recipient address '{}'", message.to),
                e,
            )
        })?;

        let builder = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject.clone());

        let built = match &message.html_body {
            Some(html) => builder.multipart(MultiPart::alternative_plain_html(
                message.text_body.clone(),
                html.clone(),
            )),
            None => builder
                .header(ContentType::TEXT_PLAIN)
                .body(message.text_body.clone()),
        };

        built.map_err(|e| AppError::with_source(ErrorKind::Dispatch, "Failed to build email", e))
    }
}

#[async_trait]
impl Dispatcher for SmtpDispatcher {
    fn channel(&self) -> &str {
        "smtp"
    }

    async fn send(&self, message: &OutboundMessage) -> AppResult<()> {
        let email = self.build_message(message)?;
        let response = self.transport.send(email).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Dispatch,
                format!("SMTP delivery to {} failed", message.to),
                e,
            )
        })?;
        debug!(to = %message.to, code = %response.code(), "Email accepted by relay");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_sender_is_configuration_error() {
        let config = EmailConfig {
            from: "not an address".into(),
            ..EmailConfig::default()
        };
        let err = SmtpDispatcher::new(&config).expect_err("bad sender");
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn test_invalid_recipient_is_dispatch_error() {
        let dispatcher = SmtpDispatcher::new(&EmailConfig::default()).expect("dispatcher");
        let err = dispatcher
            .build_message(&OutboundMessage::text("nobody", "Milk expires today", "body"))
            .expect_err("bad recipient");
        assert_eq!(err.kind, ErrorKind::Dispatch);
    }

    #[tokio::test]
    async fn test_builds_multipart_message() {
        let dispatcher = SmtpDispatcher::new(&EmailConfig::default()).expect("dispatcher");
        let message = OutboundMessage::text("ana@example.com", "Milk expires today", "plain")
            .with_html("<p>html</p>");
        let built = dispatcher.build_message(&message).expect("message");
        let raw = String::from_utf8(built.formatted()).expect("utf8");
        assert!(raw.contains("Subject: Milk expires today"));
        assert!(raw.contains("multipart/alternative"));
    }
}
