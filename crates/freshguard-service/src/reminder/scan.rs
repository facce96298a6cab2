//! The expiry reminder scan.
//!
//! Loads every item that is not fresh as of `now`, most urgent first, and
//! for each one creates the in-app notification and sends the email when
//! the reminder ledger says they are due. Items are independent: a failure
//! on one is recorded and the scan moves on.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::StreamExt;
use futures::stream;
use tracing::{debug, info, warn};

use freshguard_core::config::ReminderConfig;
use freshguard_core::error::{AppError, ErrorKind};
use freshguard_core::result::AppResult;
use freshguard_core::traits::Dispatcher;
use freshguard_core::types::UserId;
use freshguard_database::store::{ItemStore, NotificationStore, ReminderMarkStore, Stores};
use freshguard_entity::item::ReminderCandidate;
use freshguard_entity::notification::{NewNotification, NotificationKind};
use freshguard_entity::reminder::ReminderChannel;

use super::result::{ChannelOutcome, FailureKind, ItemFailure, ItemOutcome, ScanResult};
use super::template::ReminderTemplates;
use crate::expiry::{FreshnessStatus, classify, is_due, lookahead_horizon};

/// Which items a scan covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanScope {
    /// Only items owned by this user.
    User(UserId),
    /// Every user's items.
    AllUsers,
}

impl ScanScope {
    fn user(&self) -> Option<UserId> {
        match self {
            Self::User(id) => Some(*id),
            Self::AllUsers => None,
        }
    }
}

/// Concurrency and time bounds for a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Items processed at once.
    pub concurrency: usize,
    /// Budget for each store call and each dispatch.
    pub item_timeout: Duration,
    /// Budget for the whole scan, candidate load included.
    pub deadline: Duration,
}

impl From<&ReminderConfig> for ScanOptions {
    fn from(config: &ReminderConfig) -> Self {
        Self {
            concurrency: config.dispatch_concurrency.max(1),
            item_timeout: config.item_timeout(),
            deadline: config.scan_deadline(),
        }
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::from(&ReminderConfig::default())
    }
}

/// Runs expiry scans over the configured stores and dispatcher.
#[derive(Debug, Clone)]
pub struct ExpiryScanJob {
    items: Arc<dyn ItemStore>,
    marks: Arc<dyn ReminderMarkStore>,
    notifications: Arc<dyn NotificationStore>,
    dispatcher: Arc<dyn Dispatcher>,
    templates: ReminderTemplates,
    options: ScanOptions,
    dry_run: bool,
}

impl ExpiryScanJob {
    /// Creates a new scan job.
    pub fn new(
        stores: &Stores,
        dispatcher: Arc<dyn Dispatcher>,
        templates: ReminderTemplates,
        options: ScanOptions,
    ) -> Self {
        Self {
            items: stores.items.clone(),
            marks: stores.marks.clone(),
            notifications: stores.notifications.clone(),
            dispatcher,
            templates,
            options,
            dry_run: false,
        }
    }

    /// Report what would be delivered without writing notifications,
    /// recording marks or calling the dispatcher.
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Scan `scope` as of `now`.
    ///
    /// Fails only when candidates cannot be loaded in time. When the
    /// deadline elapses later the partial result is returned with
    /// `timed_out` set.
    pub async fn run(&self, scope: ScanScope, now: DateTime<Utc>) -> AppResult<ScanResult> {
        let deadline = tokio::time::sleep(self.options.deadline);
        tokio::pin!(deadline);

        let load = self.bounded(
            "Loading reminder candidates",
            self.items.find_candidates(scope.user(), lookahead_horizon(now)),
        );
        let mut candidates = tokio::select! {
            biased;
            _ = &mut deadline => {
                return Err(AppError::timeout(
                    "Scan deadline elapsed while loading reminder candidates",
                ));
            }
            loaded = load => loaded?,
        };
        candidates.sort_by_key(|c| c.expiry_date);

        info!(
            scope = ?scope,
            candidates = candidates.len(),
            dispatcher = self.dispatcher.channel(),
            dry_run = self.dry_run,
            "Expiry scan started"
        );

        let mut result = ScanResult {
            dry_run: self.dry_run,
            ..ScanResult::default()
        };
        let mut outcomes = stream::iter(candidates)
            .map(|candidate| self.process(candidate, now))
            .buffered(self.options.concurrency.max(1));

        loop {
            tokio::select! {
                biased;
                _ = &mut deadline => {
                    result.timed_out = true;
                    warn!(
                        deadline_secs = self.options.deadline.as_secs(),
                        processed = result.items_scanned,
                        "Expiry scan deadline reached; returning partial result"
                    );
                    break;
                }
                next = outcomes.next() => match next {
                    Some(outcome) => result.record(outcome),
                    None => break,
                },
            }
        }

        info!(
            items_scanned = result.items_scanned,
            notifications_created = result.notifications_created,
            emails_sent = result.emails_sent,
            emails_failed = result.emails_failed,
            failed = result.failures.len(),
            timed_out = result.timed_out,
            "Expiry scan finished"
        );
        Ok(result)
    }

    /// Run `step` under the per-call budget.
    async fn bounded<T>(
        &self,
        step: &str,
        fut: impl Future<Output = AppResult<T>>,
    ) -> AppResult<T> {
        match tokio::time::timeout(self.options.item_timeout, fut).await {
            Ok(outcome) => outcome,
            Err(_) => Err(AppError::timeout(format!(
                "{step} did not finish within {}s",
                self.options.item_timeout.as_secs()
            ))),
        }
    }

    async fn process(
        &self,
        candidate: ReminderCandidate,
        now: DateTime<Utc>,
    ) -> Result<ItemOutcome, ItemFailure> {
        let status = classify(candidate.expiry_date, now);
        let Some(kind) = status.notification_kind() else {
            return Ok(ItemOutcome {
                item_id: candidate.item_id,
                name: candidate.name,
                summary: String::new(),
                in_app: ChannelOutcome::NotDue,
                email: ChannelOutcome::NotDue,
                failure: None,
            });
        };

        let in_app = self
            .deliver_in_app(&candidate, &status, kind, now)
            .await
            .map_err(|e| item_failure(&candidate, e))?;

        // The in-app outcome stands even when the email side cannot be read.
        let (email, failure) = match self.deliver_email(&candidate, &status, kind, now).await {
            Ok(outcome) => (outcome, None),
            Err(e) => {
                let failure = item_failure(&candidate, e);
                (ChannelOutcome::Failed(failure.detail.clone()), Some(failure))
            }
        };

        Ok(ItemOutcome {
            item_id: candidate.item_id,
            summary: ReminderTemplates::summary(&status),
            name: candidate.name,
            in_app,
            email,
            failure,
        })
    }

    async fn deliver_in_app(
        &self,
        candidate: &ReminderCandidate,
        status: &FreshnessStatus,
        kind: NotificationKind,
        now: DateTime<Utc>,
    ) -> AppResult<ChannelOutcome> {
        let last = self
            .bounded(
                "Reading the in-app mark",
                self.marks
                    .last_notified(candidate.item_id, ReminderChannel::InApp, kind),
            )
            .await?;
        if !is_due(last, status, now) {
            return Ok(ChannelOutcome::NotDue);
        }
        let Some(text) = self.templates.in_app(&candidate.name, status) else {
            return Ok(ChannelOutcome::NotDue);
        };
        if self.dry_run {
            debug!(item_id = %candidate.item_id, %kind, "Dry run; notification not created");
            return Ok(ChannelOutcome::Delivered);
        }

        let created = self
            .bounded(
                "Creating the notification",
                self.notifications.create_notification(NewNotification {
                    user_id: candidate.user_id,
                    item_id: Some(candidate.item_id),
                    kind,
                    title: text.title,
                    message: text.message,
                    created_at: now,
                }),
            )
            .await;
        let outcome = match created {
            Ok(_) => ChannelOutcome::Delivered,
            Err(e) if e.is_conflict() => {
                debug!(item_id = %candidate.item_id, %kind, "Notification already created today");
                ChannelOutcome::AlreadyDelivered
            }
            Err(e) => return Err(e),
        };

        self.bounded(
            "Recording the in-app mark",
            self.marks
                .record_mark(candidate.item_id, ReminderChannel::InApp, kind, now),
        )
        .await?;
        Ok(outcome)
    }

    async fn deliver_email(
        &self,
        candidate: &ReminderCandidate,
        status: &FreshnessStatus,
        kind: NotificationKind,
        now: DateTime<Utc>,
    ) -> AppResult<ChannelOutcome> {
        let last = self
            .bounded(
                "Reading the email mark",
                self.marks
                    .last_notified(candidate.item_id, ReminderChannel::Email, kind),
            )
            .await?;
        if !is_due(last, status, now) {
            return Ok(ChannelOutcome::NotDue);
        }
        let Some(message) = self.templates.email(candidate, status) else {
            return Ok(ChannelOutcome::NotDue);
        };
        if self.dry_run {
            debug!(item_id = %candidate.item_id, to = %message.to, "Dry run; email not sent");
            return Ok(ChannelOutcome::Delivered);
        }

        if let Err(e) = self
            .bounded("Dispatch", self.dispatcher.send(&message))
            .await
        {
            warn!(
                item_id = %candidate.item_id,
                to = %message.to,
                error = %e,
                "Reminder email failed; will retry on next scan"
            );
            return Ok(ChannelOutcome::Failed(e.message));
        }

        if let Err(e) = self
            .bounded(
                "Recording the email mark",
                self.marks
                    .record_mark(candidate.item_id, ReminderChannel::Email, kind, now),
            )
            .await
        {
            warn!(item_id = %candidate.item_id, error = %e, "Email sent but mark not recorded");
        }
        Ok(ChannelOutcome::Delivered)
    }
}

fn item_failure(candidate: &ReminderCandidate, error: AppError) -> ItemFailure {
    warn!(item_id = %candidate.item_id, error = %error, "Reminder persistence failed");
    let kind = if error.kind == ErrorKind::Timeout {
        FailureKind::Timeout
    } else {
        FailureKind::Persistence
    };
    ItemFailure {
        item_id: candidate.item_id,
        kind,
        detail: error.message,
    }
}
