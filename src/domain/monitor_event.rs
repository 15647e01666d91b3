//! Domain events reflecting check and alert activity.
//!
//! Every completed check and raised alert emits a [`MonitorEvent`] through
//! the [`super::EventBus`]. Events are broadcast to WebSocket subscribers.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::alert::AlertId;
use super::check_result::RiskCategory;

/// Domain event emitted by the check orchestrator and monitor loop.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum MonitorEvent {
    /// Emitted after every check invocation, alert or not.
    CheckCompleted {
        /// Email that was checked.
        email: String,
        /// Number of breach records found.
        breach_count: u32,
        /// Computed risk score.
        risk_score: u8,
        /// Computed risk category.
        risk_category: RiskCategory,
        /// Whether this check observed new breach names.
        new_breach_detected: bool,
        /// Completion timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when a check observes breach names not present in the
    /// previous stored result.
    AlertRaised {
        /// Alert identifier.
        alert_id: AlertId,
        /// Email the alert concerns.
        email: String,
        /// Newly observed breach names.
        new_breach_names: Vec<String>,
        /// Risk score of the triggering check.
        risk_score: u8,
        /// Creation timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when the periodic monitor finishes one cycle over all
    /// monitored emails.
    ScanCycleCompleted {
        /// Emails processed this cycle.
        emails_checked: u32,
        /// Alerts created this cycle.
        alerts_created: u32,
        /// Emails whose check failed this cycle.
        failures: u32,
        /// Completion timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl MonitorEvent {
    /// Returns the email this event concerns, when it has one.
    ///
    /// Cycle-level events carry no single email and return `None`.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        match self {
            Self::CheckCompleted { email, .. } | Self::AlertRaised { email, .. } => {
                Some(email.as_str())
            }
            Self::ScanCycleCompleted { .. } => None,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::CheckCompleted { .. } => "check_completed",
            Self::AlertRaised { .. } => "alert_raised",
            Self::ScanCycleCompleted { .. } => "scan_cycle_completed",
        }
    }
}
