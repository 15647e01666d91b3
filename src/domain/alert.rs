//! Alert events raised when a monitored email's breach set grows.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::check_result::CheckResult;

/// Unique identifier for an alert event.
///
/// Wraps a UUID v4. Generated once at alert creation time and immutable
/// thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertId(uuid::Uuid);

impl AlertId {
    /// Creates a new random `AlertId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates an `AlertId` from an existing [`uuid::Uuid`].
    #[must_use]
    pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for AlertId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Durable record that a check observed breach names not present in the
/// previous stored result for the same email.
///
/// Immutable once appended to the alert store; removed only when the
/// monitored email itself is removed (cascading delete).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertEvent {
    /// Alert identifier.
    pub id: AlertId,
    /// Email the alert concerns.
    pub email: String,
    /// When the alert was created.
    pub created_at: DateTime<Utc>,
    /// Breach names that were newly observed in this check.
    pub new_breach_names: Vec<String>,
    /// Snapshot of the check result that triggered the alert.
    pub snapshot: CheckResult,
}

impl AlertEvent {
    /// Builds an alert for the given check result and newly seen names.
    #[must_use]
    pub fn new(snapshot: CheckResult, new_breach_names: Vec<String>) -> Self {
        Self {
            id: AlertId::new(),
            email: snapshot.email.clone(),
            created_at: Utc::now(),
            new_breach_names,
            snapshot,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::check_result::RiskCategory;

    fn sample_result() -> CheckResult {
        CheckResult {
            email: "user@example.com".to_string(),
            checked_at: Utc::now(),
            breach_count: 0,
            breaches: Vec::new(),
            risk_score: 0,
            risk_category: RiskCategory::Low,
            recommendations: Vec::new(),
        }
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(AlertId::new(), AlertId::new());
    }

    #[test]
    fn alert_inherits_email_from_snapshot() {
        let alert = AlertEvent::new(sample_result(), vec!["Adobe".to_string()]);
        assert_eq!(alert.email, "user@example.com");
        assert_eq!(alert.new_breach_names, vec!["Adobe".to_string()]);
    }

    #[test]
    fn serde_round_trip() {
        let alert = AlertEvent::new(sample_result(), vec!["Adobe".to_string()]);
        let json = serde_json::to_string(&alert).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        let back: Option<AlertEvent> = serde_json::from_str(&json).ok();
        assert_eq!(back, Some(alert));
    }
}
