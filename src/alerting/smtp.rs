//! SMTP alert dispatcher backed by `lettre`.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{AlertDispatch, DispatchFuture};
use crate::domain::AlertEvent;
use crate::error::MonitorError;

/// Sends plain-text alert email through an SMTP relay (STARTTLS).
pub struct SmtpDispatch {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl std::fmt::Debug for SmtpDispatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpDispatch")
            .field("from", &self.from)
            .finish_non_exhaustive()
    }
}

impl SmtpDispatch {
    /// Builds a STARTTLS transport for the given relay.
    ///
    /// Credentials are attached only when both username and password are
    /// non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Dispatch`] if the relay host is invalid.
    pub fn new(
        host: &str,
        port: u16,
        username: &str,
        password: &str,
        from: &str,
    ) -> Result<Self, MonitorError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| MonitorError::Dispatch(format!("smtp relay: {e}")))?
            .port(port);

        if !username.is_empty() && !password.is_empty() {
            builder = builder.credentials(Credentials::new(
                username.to_string(),
                password.to_string(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from: from.to_string(),
        })
    }

    async fn deliver(&self, alert: &AlertEvent) -> Result<(), MonitorError> {
        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| MonitorError::Dispatch(format!("invalid from address: {e}")))?,
            )
            .to(alert
                .email
                .parse()
                .map_err(|e| MonitorError::Dispatch(format!("invalid to address: {e}")))?)
            .subject(alert_subject(alert))
            .header(ContentType::TEXT_PLAIN)
            .body(alert_body(alert))
            .map_err(|e| MonitorError::Dispatch(format!("failed to build email: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MonitorError::Dispatch(e.to_string()))?;

        Ok(())
    }
}

impl AlertDispatch for SmtpDispatch {
    fn send<'a>(&'a self, alert: &'a AlertEvent) -> DispatchFuture<'a> {
        Box::pin(self.deliver(alert))
    }
}

/// Subject line for an alert email.
fn alert_subject(alert: &AlertEvent) -> String {
    format!(
        "BreachWatch alert: {} new breach{} for {}",
        alert.new_breach_names.len(),
        if alert.new_breach_names.len() == 1 {
            ""
        } else {
            "es"
        },
        alert.email
    )
}

/// Plain-text body: the newly observed breaches plus the remediation plan
/// computed for the triggering check.
fn alert_body(alert: &AlertEvent) -> String {
    let mut body = format!(
        "New data breaches were detected for {}.\n\nNewly observed breaches:\n",
        alert.email
    );
    for breach in &alert.snapshot.breaches {
        if alert.new_breach_names.iter().any(|n| n == &breach.name) {
            body.push_str(&format!(
                "  - {} ({}) exposing: {}\n",
                breach.name,
                breach.date,
                breach.data_exposed.join(", ")
            ));
        }
    }
    body.push_str(&format!(
        "\nRisk score: {} ({})\n\nRecommended actions:\n",
        alert.snapshot.risk_score, alert.snapshot.risk_category
    ));
    for recommendation in &alert.snapshot.recommendations {
        body.push_str(&format!("  - {recommendation}\n"));
    }
    body
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::breach::{BreachDate, BreachRecord};
    use crate::domain::{CheckResult, RiskCategory};

    fn sample_alert() -> AlertEvent {
        AlertEvent::new(
            CheckResult {
                email: "user@example.com".to_string(),
                checked_at: chrono::Utc::now(),
                breach_count: 2,
                breaches: vec![
                    BreachRecord {
                        name: "Adobe".to_string(),
                        date: BreachDate::parse("2013-10-04"),
                        data_exposed: vec!["Passwords".to_string()],
                    },
                    BreachRecord {
                        name: "OldKnown".to_string(),
                        date: BreachDate::Unknown,
                        data_exposed: vec!["Email addresses".to_string()],
                    },
                ],
                risk_score: 51,
                risk_category: RiskCategory::Medium,
                recommendations: vec!["Reset password immediately and enable 2FA.".to_string()],
            },
            vec!["Adobe".to_string()],
        )
    }

    #[test]
    fn subject_counts_new_breaches() {
        let subject = alert_subject(&sample_alert());
        assert!(subject.contains("1 new breach for user@example.com"));
    }

    #[test]
    fn body_lists_only_newly_observed_breaches() {
        let body = alert_body(&sample_alert());
        assert!(body.contains("Adobe"));
        assert!(!body.contains("OldKnown"));
        assert!(body.contains("Reset password"));
        assert!(body.contains("Risk score: 51 (Medium)"));
    }
}
