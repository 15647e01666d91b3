//! Dashboard, monitored-email, and alert DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::check_dto::{BreachRecordDto, CheckResponse};
use crate::domain::AlertEvent;

/// Query parameters for email-scoped reads (`GET /dashboard`,
/// `GET /alerts`).
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
pub struct EmailQuery {
    /// Email address to query.
    pub email: String,
}

/// Response body for `GET /dashboard`.
///
/// Built from the latest stored result; an email that was never checked
/// gets the zero-breach shape rather than a 404.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// Queried email.
    pub email: String,
    /// Breach count from the latest stored result.
    pub breach_count: u32,
    /// Risk score from the latest stored result.
    pub risk_score: u8,
    /// Risk category label.
    pub risk_category: String,
    /// The breach with the most recent known date, if any.
    pub most_recent_breach: Option<BreachRecordDto>,
    /// All breaches from the latest stored result.
    pub breaches: Vec<BreachRecordDto>,
    /// Recommendations from the latest stored result.
    pub recommendations: Vec<String>,
    /// Whether any alert exists for this email.
    pub show_alert_banner: bool,
    /// When the latest stored check ran.
    pub last_checked_at: Option<DateTime<Utc>>,
}

/// One alert event on the wire.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlertDto {
    /// Alert identifier.
    pub id: uuid::Uuid,
    /// Email the alert concerns.
    pub email: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Newly observed breach names.
    pub new_breach_names: Vec<String>,
    /// Risk score of the triggering check.
    pub risk_score: u8,
    /// Risk category label of the triggering check.
    pub risk_category: String,
}

impl From<&AlertEvent> for AlertDto {
    fn from(alert: &AlertEvent) -> Self {
        Self {
            id: *alert.id.as_uuid(),
            email: alert.email.clone(),
            created_at: alert.created_at,
            new_breach_names: alert.new_breach_names.clone(),
            risk_score: alert.snapshot.risk_score,
            risk_category: alert.snapshot.risk_category.to_string(),
        }
    }
}

/// Response body for `GET /alerts`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AlertListResponse {
    /// Alerts oldest first.
    pub data: Vec<AlertDto>,
}

/// Request body for `POST /monitored`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddMonitoredRequest {
    /// Email address to start monitoring.
    pub email: String,
}

/// Response body for `POST /monitored`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddMonitoredResponse {
    /// Updated monitored-email list.
    pub emails: Vec<String>,
    /// Result of the immediate check run on add; `None` when that check
    /// failed (the add itself still succeeded).
    pub breach_check: Option<CheckResponse>,
}

/// Response body for `GET /monitored` and `DELETE /monitored/{email}`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MonitoredListResponse {
    /// Monitored emails in lexicographic order.
    pub emails: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{CheckResult, RiskCategory};

    #[test]
    fn alert_dto_carries_snapshot_risk() {
        let alert = AlertEvent::new(
            CheckResult {
                email: "user@example.com".to_string(),
                checked_at: Utc::now(),
                breach_count: 1,
                breaches: Vec::new(),
                risk_score: 72,
                risk_category: RiskCategory::High,
                recommendations: Vec::new(),
            },
            vec!["Adobe".to_string()],
        );
        let dto = AlertDto::from(&alert);
        assert_eq!(dto.risk_score, 72);
        assert_eq!(dto.risk_category, "High");

        let json = serde_json::to_string(&dto).unwrap_or_default();
        assert!(json.contains("\"newBreachNames\":[\"Adobe\"]"));
    }
}
