//! Outbound alert dispatch: the port plus SMTP and log-only
//! implementations.
//!
//! Dispatch is best-effort by contract: a failure here is logged by the
//! orchestrator and never affects the check result, the stored snapshot,
//! or the alert event.

pub mod smtp;

use std::future::Future;
use std::pin::Pin;

use crate::domain::AlertEvent;
use crate::error::MonitorError;

pub use smtp::SmtpDispatch;

/// Boxed future returned by [`AlertDispatch::send`].
pub type DispatchFuture<'a> = Pin<Box<dyn Future<Output = Result<(), MonitorError>> + Send + 'a>>;

/// Secondary port for delivering alert notifications.
pub trait AlertDispatch: Send + Sync {
    /// Delivers a notification for `alert` to its email's owner.
    fn send<'a>(&'a self, alert: &'a AlertEvent) -> DispatchFuture<'a>;
}

/// Dispatch implementation used when SMTP is not configured: records the
/// alert in the log and succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDispatch;

impl AlertDispatch for LogDispatch {
    fn send<'a>(&'a self, alert: &'a AlertEvent) -> DispatchFuture<'a> {
        Box::pin(async move {
            tracing::info!(
                email = %alert.email,
                new_breaches = alert.new_breach_names.len(),
                "alert dispatch skipped (smtp not configured)"
            );
            Ok(())
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{CheckResult, RiskCategory};

    #[tokio::test]
    async fn log_dispatch_always_succeeds() {
        let alert = AlertEvent::new(
            CheckResult {
                email: "user@example.com".to_string(),
                checked_at: chrono::Utc::now(),
                breach_count: 1,
                breaches: Vec::new(),
                risk_score: 34,
                risk_category: RiskCategory::Medium,
                recommendations: Vec::new(),
            },
            vec!["Adobe".to_string()],
        );
        let dispatch: Box<dyn AlertDispatch> = Box::new(LogDispatch);
        assert!(dispatch.send(&alert).await.is_ok());
    }
}
