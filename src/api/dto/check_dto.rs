//! Check request/response DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{BreachRecord, CheckResult};
use crate::service::CheckOutcome;

/// Request body for `POST /checks`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CheckRequest {
    /// Email address to check. Trimmed and lowercased server-side.
    pub email: String,
}

/// One breach record on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BreachRecordDto {
    /// Breach source identifier.
    pub name: String,
    /// Breach date (`YYYY-MM-DD`) or the literal `"unknown"`.
    pub breach_date: String,
    /// Categories of data compromised.
    pub data_exposed: Vec<String>,
}

impl From<&BreachRecord> for BreachRecordDto {
    fn from(record: &BreachRecord) -> Self {
        Self {
            name: record.name.clone(),
            breach_date: record.date.to_string(),
            data_exposed: record.data_exposed.clone(),
        }
    }
}

/// Response body for `POST /checks`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    /// Normalized email that was checked.
    pub email: String,
    /// Number of breaches on record.
    pub breach_count: u32,
    /// Risk score in `[0, 100]`.
    pub risk_score: u8,
    /// Risk category label (`Low`, `Medium`, `High`).
    pub risk_category: String,
    /// Breach records in source order.
    pub breaches: Vec<BreachRecordDto>,
    /// Ordered remediation recommendations.
    pub recommendations: Vec<String>,
    /// Whether this check observed breach names absent from the previous
    /// stored result.
    pub new_breach_detected: bool,
    /// Whether an alert event was stored for this check.
    pub alert_created: bool,
    /// `false` when the store was unavailable and this response is
    /// best-effort only.
    pub persisted: bool,
}

impl From<&CheckOutcome> for CheckResponse {
    fn from(outcome: &CheckOutcome) -> Self {
        Self {
            email: outcome.result.email.clone(),
            breach_count: outcome.result.breach_count,
            risk_score: outcome.result.risk_score,
            risk_category: outcome.result.risk_category.to_string(),
            breaches: outcome.result.breaches.iter().map(Into::into).collect(),
            recommendations: outcome.result.recommendations.clone(),
            new_breach_detected: outcome.new_breach_detected,
            alert_created: outcome.alert_created,
            persisted: outcome.persisted,
        }
    }
}

/// Breach summary fields shared by the dashboard view.
#[must_use]
pub fn breaches_to_dto(result: &CheckResult) -> Vec<BreachRecordDto> {
    result.breaches.iter().map(Into::into).collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::breach::BreachDate;
    use crate::domain::RiskCategory;

    #[test]
    fn check_response_uses_camel_case_keys() {
        let outcome = CheckOutcome {
            result: CheckResult {
                email: "user@example.com".to_string(),
                checked_at: chrono::Utc::now(),
                breach_count: 1,
                breaches: vec![BreachRecord {
                    name: "Adobe".to_string(),
                    date: BreachDate::parse("2013-10-04"),
                    data_exposed: vec!["Passwords".to_string()],
                }],
                risk_score: 34,
                risk_category: RiskCategory::Medium,
                recommendations: vec!["Reset password immediately and enable 2FA.".to_string()],
            },
            new_breach_detected: true,
            new_breach_names: vec!["Adobe".to_string()],
            alert_created: true,
            persisted: true,
        };

        let json = serde_json::to_string(&CheckResponse::from(&outcome)).unwrap_or_default();
        assert!(json.contains("\"breachCount\":1"));
        assert!(json.contains("\"riskScore\":34"));
        assert!(json.contains("\"riskCategory\":\"Medium\""));
        assert!(json.contains("\"newBreachDetected\":true"));
        assert!(json.contains("\"alertCreated\":true"));
        assert!(json.contains("\"breachDate\":\"2013-10-04\""));
    }

    #[test]
    fn unknown_date_serializes_as_sentinel() {
        let record = BreachRecord {
            name: "LegacySite".to_string(),
            date: BreachDate::Unknown,
            data_exposed: vec!["Email addresses".to_string()],
        };
        let dto = BreachRecordDto::from(&record);
        assert_eq!(dto.breach_date, "unknown");
    }
}
