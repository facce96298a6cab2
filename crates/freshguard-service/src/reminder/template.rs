//! Reminder wording for in-app notifications and emails.

use freshguard_core::types::OutboundMessage;
use freshguard_entity::item::ReminderCandidate;

use crate::expiry::FreshnessStatus;

/// Title and body of an in-app notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InAppText {
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub message: String,
}

/// Renders reminder texts. Fresh items render nothing.
#[derive(Debug, Clone)]
pub struct ReminderTemplates {
    dashboard_url: String,
}

impl ReminderTemplates {
    /// Templates linking to `<base_url>/dashboard`.
    pub fn new(base_url: &str) -> Self {
        Self {
            dashboard_url: format!("{}/dashboard", base_url.trim_end_matches('/')),
        }
    }

    /// One-line status summary, e.g. `expires in 2 days`.
    pub fn summary(status: &FreshnessStatus) -> String {
        match *status {
            FreshnessStatus::Fresh => "is fresh".to_string(),
            FreshnessStatus::ExpiringSoon { days_remaining: 0 } => "expires today".to_string(),
            FreshnessStatus::ExpiringSoon { days_remaining: 1 } => "expires tomorrow".to_string(),
            FreshnessStatus::ExpiringSoon { days_remaining } => {
                format!("expires in {days_remaining} days")
            }
            FreshnessStatus::Expired { days_overdue } => {
                format!("expired {} ago", plural_days(days_overdue))
            }
        }
    }

    /// In-app notification text.
    pub fn in_app(&self, name: &str, status: &FreshnessStatus) -> Option<InAppText> {
        let (title, message) = match *status {
            FreshnessStatus::Fresh => return None,
            FreshnessStatus::ExpiringSoon { days_remaining } => {
                let message = match days_remaining {
                    0 => format!("{name} expires today! Use it now to avoid waste."),
                    1 => format!("{name} expires tomorrow! Make sure to use it soon."),
                    n => format!("{name} expires in {n} days. Plan to use it soon."),
                };
                (format!("{name} expiring soon"), message)
            }
            FreshnessStatus::Expired { days_overdue } => (
                format!("{name} has expired"),
                format!(
                    "{name} expired {} ago and should be discarded.",
                    plural_days(days_overdue)
                ),
            ),
        };
        Some(InAppText { title, message })
    }

    /// Email to the item's owner.
    pub fn email(
        &self,
        candidate: &ReminderCandidate,
        status: &FreshnessStatus,
    ) -> Option<OutboundMessage> {
        let name = &candidate.name;
        let (subject, detail) = match *status {
            FreshnessStatus::Fresh => return None,
            FreshnessStatus::ExpiringSoon { days_remaining } => (
                format!("{name} {}", Self::summary(status)),
                format!("Days remaining: {days_remaining}"),
            ),
            FreshnessStatus::Expired { days_overdue } => (
                format!("{name} has expired"),
                format!("Days overdue: {days_overdue}"),
            ),
        };
        let expiry = candidate.expiry_date.format("%Y-%m-%d").to_string();
        let advice = match status {
            FreshnessStatus::Expired { .. } => {
                "Please discard this item to keep your inventory fresh and safe."
            }
            _ => "Please use this item soon to reduce food waste.",
        };

        let text = format!(
            "Hi {owner},\n\n\
             Your item \"{name}\" {summary}.\n\n\
             Expiry date: {expiry}\n\
             {detail}\n\n\
             {advice}\n\n\
             View your inventory: {url}\n\n\
             FreshGuard\n",
            owner = candidate.owner_name,
            summary = Self::summary(status),
            url = self.dashboard_url,
        );

        let html = format!(
            "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
             <h1>FreshGuard</h1>\
             <p>Hi {owner},</p>\
             <h2>{name}</h2>\
             <p>This item {summary}.</p>\
             <p><strong>Expiry date:</strong> {expiry}</p>\
             <p><strong>{detail}</strong></p>\
             <p>{advice}</p>\
             <p><a href=\"{url}\">View your inventory</a></p>\
             </div>",
            owner = html_escape::encode_text(&candidate.owner_name),
            name = html_escape::encode_text(name),
            summary = Self::summary(status),
            url = html_escape::encode_double_quoted_attribute(&self.dashboard_url),
        );

        Some(OutboundMessage::text(&candidate.owner_email, subject, text).with_html(html))
    }
}

fn plural_days(n: i64) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{n} days")
    }
}
