//! Manual expiry scan.

use std::sync::Arc;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use freshguard_core::config::AppConfig;
use freshguard_core::error::AppError;
use freshguard_core::traits::Dispatcher;
use freshguard_mailer::{LogDispatcher, SmtpDispatcher};
use freshguard_service::{ExpiryScanJob, ReminderTemplates, ScanOptions, ScanResult, ScanScope};

use crate::output::{self, OutputFormat};

/// Arguments for the scan command
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Only scan this user's items (id or email). Scans every user when omitted.
    #[arg(short, long)]
    pub user: Option<String>,

    /// Report what would be delivered without writing or sending anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Scan totals for table output
#[derive(Debug, Serialize, Tabled)]
struct SummaryRow {
    /// Items scanned
    scanned: usize,
    /// Notifications created
    notifications: usize,
    /// Emails sent
    emails_sent: usize,
    /// Emails failed
    emails_failed: usize,
    /// Items failed
    failed: usize,
    /// Deadline hit
    timed_out: bool,
}

/// Notified item row
#[derive(Debug, Serialize, Tabled)]
struct NotifiedRow {
    /// Item ID
    item_id: String,
    /// Item name
    name: String,
    /// Status
    status: String,
}

/// Execute the scan command
pub async fn execute(
    args: &ScanArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let (stores, pool) = super::open_stores(config).await?;

    let scope = match &args.user {
        Some(key) => ScanScope::User(super::inventory(&stores).find_user(key).await?.id),
        None => ScanScope::AllUsers,
    };

    let dispatcher: Arc<dyn Dispatcher> = if config.email.enabled && !args.dry_run {
        Arc::new(SmtpDispatcher::new(&config.email)?)
    } else {
        Arc::new(LogDispatcher)
    };

    let mut job = ExpiryScanJob::new(
        &stores,
        dispatcher,
        ReminderTemplates::new(&config.email.base_url),
        ScanOptions::from(&config.reminder),
    );
    if args.dry_run {
        job = job.dry_run();
    }
    let result = job.run(scope, super::clock().now()).await?;

    print_result(&result, format);
    if let Some(pool) = pool {
        pool.close().await;
    }
    Ok(())
}

fn print_result(result: &ScanResult, format: OutputFormat) {
    if format == OutputFormat::Json {
        let json = serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string());
        println!("{json}");
        return;
    }

    output::print_item(
        &SummaryRow {
            scanned: result.items_scanned,
            notifications: result.notifications_created,
            emails_sent: result.emails_sent,
            emails_failed: result.emails_failed,
            failed: result.failures.len(),
            timed_out: result.timed_out,
        },
        format,
    );

    let rows: Vec<NotifiedRow> = result
        .notified_items
        .iter()
        .map(|n| NotifiedRow {
            item_id: n.item_id.to_string(),
            name: n.name.clone(),
            status: n.summary.clone(),
        })
        .collect();
    if !rows.is_empty() {
        output::print_list(&rows, format);
    }

    for failure in &result.failures {
        output::print_warning(&format!(
            "Item {} failed ({:?}): {}",
            failure.item_id, failure.kind, failure.detail
        ));
    }
    if result.timed_out {
        output::print_warning("Scan deadline elapsed; remaining items were skipped.");
    }
    if result.dry_run {
        output::print_warning("Dry run: nothing was written or sent.");
    }
}
