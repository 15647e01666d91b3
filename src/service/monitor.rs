//! Periodic monitoring loop over the monitored-email set.
//!
//! A cancellable background task that invokes the stateless
//! [`CheckService`] once per monitored email per cycle. A failure on one
//! email is logged and never aborts the remainder of the cycle.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::domain::{EventBus, MonitorEvent};
use crate::persistence::MonitoredStore;

use super::check_service::CheckService;

/// Statistics for one completed monitoring cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    /// Emails processed this cycle.
    pub emails_checked: u32,
    /// Alerts created this cycle.
    pub alerts_created: u32,
    /// Emails whose check failed this cycle.
    pub failures: u32,
}

/// Periodic breach monitor.
pub struct MonitorService {
    check_service: Arc<CheckService>,
    monitored: Arc<dyn MonitoredStore>,
    event_bus: EventBus,
    interval: Duration,
}

impl std::fmt::Debug for MonitorService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonitorService")
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

impl MonitorService {
    /// Creates a new `MonitorService`.
    #[must_use]
    pub fn new(
        check_service: Arc<CheckService>,
        monitored: Arc<dyn MonitoredStore>,
        event_bus: EventBus,
        interval: Duration,
    ) -> Self {
        Self {
            check_service,
            monitored,
            event_bus,
            interval,
        }
    }

    /// Runs one cycle over all monitored emails.
    ///
    /// Per-email failures are counted, logged, and skipped; the cycle
    /// itself cannot fail.
    pub async fn run_cycle(&self) -> CycleStats {
        let mut stats = CycleStats::default();

        let emails = match self.monitored.list().await {
            Ok(emails) => emails,
            Err(err) => {
                tracing::error!(%err, "could not list monitored emails; skipping cycle");
                stats.failures = 1;
                return stats;
            }
        };

        tracing::info!(count = emails.len(), "starting monitoring cycle");

        for email in emails {
            match self.check_service.check(&email).await {
                Ok(outcome) => {
                    stats.emails_checked += 1;
                    if outcome.alert_created {
                        stats.alerts_created += 1;
                    }
                }
                Err(err) => {
                    tracing::error!(%email, %err, "monitored check failed");
                    stats.failures += 1;
                }
            }
        }

        let _ = self.event_bus.publish(MonitorEvent::ScanCycleCompleted {
            emails_checked: stats.emails_checked,
            alerts_created: stats.alerts_created,
            failures: stats.failures,
            timestamp: Utc::now(),
        });

        tracing::info!(
            emails_checked = stats.emails_checked,
            alerts_created = stats.alerts_created,
            failures = stats.failures,
            "monitoring cycle completed"
        );

        stats
    }

    /// Spawns the periodic loop.
    ///
    /// The first cycle runs immediately; subsequent cycles run every
    /// configured interval. Sending a value on `shutdown` (or dropping
    /// its sender) stops the loop after the current select arm.
    pub fn spawn(self: Arc<Self>, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let _ = self.run_cycle().await;
                    }
                    _ = shutdown.changed() => {
                        tracing::info!("monitor loop stopped");
                        break;
                    }
                }
            }
        })
    }
}
