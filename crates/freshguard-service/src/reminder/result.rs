//! Outcome of an expiry scan.

use serde::Serialize;

use freshguard_core::types::ItemId;

/// What happened on one delivery channel for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelOutcome {
    /// Not due under the dedup rule.
    NotDue,
    /// Delivered on this run.
    Delivered,
    /// Another trigger delivered it first.
    AlreadyDelivered,
    /// Delivery failed; the mark was not recorded.
    Failed(String),
}

/// Result of processing one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    /// The item.
    pub item_id: ItemId,
    /// Item name.
    pub name: String,
    /// Status summary such as `expires in 2 days`. Empty for fresh items.
    pub summary: String,
    /// In-app channel outcome.
    pub in_app: ChannelOutcome,
    /// Email channel outcome.
    pub email: ChannelOutcome,
    /// Store failure on the email channel after the in-app step completed.
    pub failure: Option<ItemFailure>,
}

/// Why an item could not be processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A store write or read failed.
    Persistence,
    /// A store call did not finish within its time budget.
    Timeout,
}

/// An item that failed during the scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFailure {
    /// The item.
    pub item_id: ItemId,
    /// Failure category.
    pub kind: FailureKind,
    /// Error detail.
    pub detail: String,
}

/// An item for which a new in-app notification was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifiedItem {
    /// The item.
    pub item_id: ItemId,
    /// Item name.
    pub name: String,
    /// Status summary.
    pub summary: String,
}

/// Aggregate counts returned to the trigger. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// Candidates examined, including fresh ones.
    pub items_scanned: usize,
    /// In-app notifications created.
    pub notifications_created: usize,
    /// Emails accepted by the dispatcher.
    pub emails_sent: usize,
    /// Emails the dispatcher rejected.
    pub emails_failed: usize,
    /// Store failures, at most one per item.
    pub failures: Vec<ItemFailure>,
    /// Items that got a new in-app notification.
    pub notified_items: Vec<NotifiedItem>,
    /// The scan deadline elapsed before every candidate was processed.
    pub timed_out: bool,
    /// Counts describe what would have been delivered; nothing was written.
    pub dry_run: bool,
}

impl ScanResult {
    /// Fold one item's result into the totals.
    pub fn record(&mut self, outcome: Result<ItemOutcome, ItemFailure>) {
        self.items_scanned += 1;
        match outcome {
            Ok(item) => {
                if item.in_app == ChannelOutcome::Delivered {
                    self.notifications_created += 1;
                    self.notified_items.push(NotifiedItem {
                        item_id: item.item_id,
                        name: item.name,
                        summary: item.summary,
                    });
                }
                match item.email {
                    ChannelOutcome::Delivered => self.emails_sent += 1,
                    ChannelOutcome::Failed(_) => self.emails_failed += 1,
                    ChannelOutcome::NotDue | ChannelOutcome::AlreadyDelivered => {}
                }
                if let Some(failure) = item.failure {
                    self.failures.push(failure);
                }
            }
            Err(failure) => self.failures.push(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(in_app: ChannelOutcome, email: ChannelOutcome) -> ItemOutcome {
        ItemOutcome {
            item_id: ItemId::new(),
            name: "Milk".into(),
            summary: "expires tomorrow".into(),
            in_app,
            email,
            failure: None,
        }
    }

    #[test]
    fn test_record_counts_each_channel() {
        let mut result = ScanResult::default();
        result.record(Ok(outcome(ChannelOutcome::Delivered, ChannelOutcome::Delivered)));
        result.record(Ok(outcome(
            ChannelOutcome::AlreadyDelivered,
            ChannelOutcome::Failed("smtp down".into()),
        )));
        result.record(Ok(outcome(ChannelOutcome::NotDue, ChannelOutcome::NotDue)));
        result.record(Err(ItemFailure {
            item_id: ItemId::new(),
            kind: FailureKind::Timeout,
            detail: "slow".into(),
        }));

        assert_eq!(result.items_scanned, 4);
        assert_eq!(result.notifications_created, 1);
        assert_eq!(result.notified_items.len(), 1);
        assert_eq!(result.emails_sent, 1);
        assert_eq!(result.emails_failed, 1);
        assert_eq!(result.failures.len(), 1);
        assert!(!result.timed_out);
    }

    #[test]
    fn test_email_side_failure_keeps_notification() {
        let mut item = outcome(
            ChannelOutcome::Delivered,
            ChannelOutcome::Failed("mark read failed".into()),
        );
        item.failure = Some(ItemFailure {
            item_id: item.item_id,
            kind: FailureKind::Persistence,
            detail: "mark read failed".into(),
        });

        let mut result = ScanResult::default();
        result.record(Ok(item));

        assert_eq!(result.notifications_created, 1);
        assert_eq!(result.emails_failed, 1);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].kind, FailureKind::Persistence);
    }
}
