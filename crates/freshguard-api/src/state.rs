//! Application state shared across all handlers.

use std::sync::Arc;
use std::time::Instant;

use freshguard_auth::{CronSecret, JwtDecoder};
use freshguard_core::config::AppConfig;
use freshguard_core::traits::{Clock, Dispatcher};
use freshguard_database::Stores;
use freshguard_service::{
    ExpiryScanJob, NotificationService, ReminderTemplates, ScanOptions, StatsService,
};

/// Shared application state injected into all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Source of the current time for every request.
    pub clock: Arc<dyn Clock>,
    /// Persistence backends.
    pub stores: Stores,
    /// Session token verification.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Secret guarding the scheduled trigger.
    pub cron_secret: Arc<CronSecret>,
    /// Expiry scan shared by both triggers and the scheduler.
    pub scan_job: Arc<ExpiryScanJob>,
    /// Notification inbox service.
    pub notification_service: Arc<NotificationService>,
    /// Item stats service.
    pub stats_service: Arc<StatsService>,
    /// Server start time.
    pub started_at: Instant,
}

impl AppState {
    /// Wires every service from configuration and the chosen backends.
    pub fn new(
        config: AppConfig,
        stores: Stores,
        dispatcher: Arc<dyn Dispatcher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let scan_job = ExpiryScanJob::new(
            &stores,
            dispatcher,
            ReminderTemplates::new(&config.email.base_url),
            ScanOptions::from(&config.reminder),
        );
        let notification_service =
            NotificationService::new(stores.notifications.clone(), clock.clone());
        let stats_service = StatsService::new(stores.items.clone(), clock.clone());

        Self {
            jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
            cron_secret: Arc::new(CronSecret::new(&config.cron)),
            scan_job: Arc::new(scan_job),
            notification_service: Arc::new(notification_service),
            stats_service: Arc::new(stats_service),
            config: Arc::new(config),
            clock,
            stores,
            started_at: Instant::now(),
        }
    }
}
