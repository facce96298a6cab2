//! Outbound message envelope handed to dispatchers.

use serde::{Deserialize, Serialize};

/// A rendered message ready for delivery on an external channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Recipient address (an email address for the SMTP channel).
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub text_body: String,
    /// HTML body. Dispatchers that cannot render HTML ignore it.
    pub html_body: Option<String>,
}

impl OutboundMessage {
    /// Build a plain-text message.
    pub fn text(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            text_body: body.into(),
            html_body: None,
        }
    }

    /// Attach an HTML alternative.
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html_body = Some(html.into());
        self
    }
}
