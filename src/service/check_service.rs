//! Check orchestrator: one `check` invocation end to end.
//!
//! Stateless coordinator over the domain functions and the collaborator
//! ports. Every invocation follows the same strictly ordered stages:
//! validate → lookup (with fallback) → normalize → score → delta against
//! the stored previous result → persist → alert. Nothing is retained
//! between invocations; each check is a function of the email, the
//! fetched breach data, and the previously stored result.

use std::sync::Arc;
use std::sync::LazyLock;
use std::time::Duration;

use chrono::Utc;
use regex::Regex;

use crate::alerting::AlertDispatch;
use crate::domain::{
    AlertEvent, CheckResult, EventBus, MonitorEvent, RawBreachEntry, detect_new_breaches,
    normalize_entries, recommendation, risk,
};
use crate::error::MonitorError;
use crate::persistence::{AlertStore, ResultStore};
use crate::source::{BreachSource, SourceError};

use super::email_locks::EmailLocks;

static EMAIL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").ok());

/// Trims, lowercases, and validates an email address.
///
/// # Errors
///
/// Returns [`MonitorError::InvalidEmail`] when the normalized address
/// does not look like an email.
pub fn normalize_email(raw: &str) -> Result<String, MonitorError> {
    let normalized = raw.trim().to_lowercase();
    let valid = EMAIL_RE
        .as_ref()
        .is_some_and(|re| re.is_match(&normalized));
    if valid {
        Ok(normalized)
    } else {
        Err(MonitorError::InvalidEmail(raw.trim().to_string()))
    }
}

/// Result of one check invocation: the scored result plus the flags the
/// orchestrator attaches after the delta and persistence stages.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    /// The scored check result.
    pub result: CheckResult,
    /// Whether this check observed breach names absent from the previous
    /// stored result.
    pub new_breach_detected: bool,
    /// The newly observed breach names, in result order.
    pub new_breach_names: Vec<String>,
    /// Whether an [`AlertEvent`] was appended to the alert store.
    pub alert_created: bool,
    /// Whether the result was persisted. `false` means the store was
    /// unavailable and the response is best-effort only.
    pub persisted: bool,
}

/// Orchestration layer for breach checks.
///
/// Owns the source pair (primary + fallback), the stores, the dispatcher,
/// and the per-email lock map. Cheap to share behind an `Arc`.
pub struct CheckService {
    primary: Arc<dyn BreachSource>,
    fallback: Arc<dyn BreachSource>,
    results: Arc<dyn ResultStore>,
    alerts: Arc<dyn AlertStore>,
    dispatch: Arc<dyn AlertDispatch>,
    event_bus: EventBus,
    locks: EmailLocks,
    source_timeout: Duration,
}

impl std::fmt::Debug for CheckService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckService")
            .field("primary", &self.primary.name())
            .field("fallback", &self.fallback.name())
            .field("source_timeout", &self.source_timeout)
            .finish_non_exhaustive()
    }
}

impl CheckService {
    /// Creates a new `CheckService`.
    #[must_use]
    pub fn new(
        primary: Arc<dyn BreachSource>,
        fallback: Arc<dyn BreachSource>,
        results: Arc<dyn ResultStore>,
        alerts: Arc<dyn AlertStore>,
        dispatch: Arc<dyn AlertDispatch>,
        event_bus: EventBus,
        source_timeout: Duration,
    ) -> Self {
        Self {
            primary,
            fallback,
            results,
            alerts,
            dispatch,
            event_bus,
            locks: EmailLocks::new(),
            source_timeout,
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Runs one breach check for `raw_email`.
    ///
    /// A check always returns a best-effort result: source failures are
    /// absorbed by the fallback, and store failures degrade the outcome
    /// flags instead of failing the call. Only a malformed email (or both
    /// sources failing) is a hard error.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::InvalidEmail`] for malformed input and
    /// [`MonitorError::Source`] when the primary and fallback sources
    /// both fail.
    pub async fn check(&self, raw_email: &str) -> Result<CheckOutcome, MonitorError> {
        let email = normalize_email(raw_email)?;

        let entries = self.fetch_entries(&email).await?;
        let breaches = normalize_entries(entries);

        let as_of = Utc::now().date_naive();
        let (risk_score, risk_category) = risk::score_and_categorize(&breaches, as_of);
        let categories = recommendation::distinct_categories(&breaches);
        let recommendations = recommendation::recommendations_for(&categories);

        let result = CheckResult {
            email: email.clone(),
            checked_at: Utc::now(),
            breach_count: breaches.len() as u32,
            breaches,
            risk_score,
            risk_category,
            recommendations,
        };

        // Delta and overwrite must see a completed prior write, so both
        // run under the per-email lock.
        let guard = self.locks.acquire(&email).await;
        let (delta, persisted) = match self.results.latest(&email).await {
            Ok(previous) => {
                let new_names = detect_new_breaches(&result, previous.as_ref());
                let persisted = match self.results.save(&result).await {
                    Ok(()) => true,
                    Err(err) => {
                        tracing::warn!(%email, %err, "failed to persist check result");
                        false
                    }
                };
                (Some(new_names), persisted)
            }
            Err(err) => {
                tracing::warn!(%email, %err, "failed to load previous result; skipping delta");
                (None, false)
            }
        };
        drop(guard);

        let new_breach_names = delta.unwrap_or_default();
        let new_breach_detected = !new_breach_names.is_empty();

        let mut alert_created = false;
        if new_breach_detected {
            let alert = AlertEvent::new(result.clone(), new_breach_names.clone());
            match self.alerts.append(&alert).await {
                Ok(()) => alert_created = true,
                Err(err) => {
                    tracing::warn!(%email, %err, "failed to store alert event");
                }
            }

            if let Err(err) = self.dispatch.send(&alert).await {
                tracing::warn!(%email, %err, "alert dispatch failed");
            }

            let _ = self.event_bus.publish(MonitorEvent::AlertRaised {
                alert_id: alert.id,
                email: email.clone(),
                new_breach_names: new_breach_names.clone(),
                risk_score,
                timestamp: Utc::now(),
            });
        }

        let _ = self.event_bus.publish(MonitorEvent::CheckCompleted {
            email: email.clone(),
            breach_count: result.breach_count,
            risk_score,
            risk_category,
            new_breach_detected,
            timestamp: Utc::now(),
        });

        tracing::info!(
            %email,
            breach_count = result.breach_count,
            risk_score,
            new_breach_detected,
            "check completed"
        );

        Ok(CheckOutcome {
            result,
            new_breach_detected,
            new_breach_names,
            alert_created,
            persisted,
        })
    }

    /// Looks up raw entries from the primary source, falling back to the
    /// alternate source on any failure or timeout.
    async fn fetch_entries(&self, email: &str) -> Result<Vec<RawBreachEntry>, MonitorError> {
        match tokio::time::timeout(self.source_timeout, self.primary.lookup(email)).await {
            Ok(Ok(entries)) => return Ok(entries),
            Ok(Err(err)) => {
                tracing::warn!(source = self.primary.name(), %err, "primary source failed; using fallback");
            }
            Err(_) => {
                tracing::warn!(source = self.primary.name(), "primary source timed out; using fallback");
            }
        }

        match tokio::time::timeout(self.source_timeout, self.fallback.lookup(email)).await {
            Ok(Ok(entries)) => Ok(entries),
            Ok(Err(err)) => Err(MonitorError::Source(err)),
            Err(_) => Err(MonitorError::Source(SourceError::Unavailable(
                "fallback source timed out".to_string(),
            ))),
        }
    }
}
