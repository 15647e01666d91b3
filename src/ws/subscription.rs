//! Per-connection subscription manager.
//!
//! Tracks which emails a WebSocket client is subscribed to and provides
//! server-side event filtering.

use std::collections::HashSet;

use crate::domain::MonitorEvent;

/// Manages the set of email subscriptions for a single WebSocket
/// connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Subscribed emails. If `subscribe_all` is true, this set is ignored.
    emails: HashSet<String>,
    /// Whether the client subscribes to everything (wildcard `"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds emails to the subscription set. `wildcard` enables the
    /// catch-all subscription.
    pub fn subscribe(&mut self, emails: &[String], wildcard: bool) {
        if wildcard {
            self.subscribe_all = true;
        }
        for email in emails {
            self.emails.insert(email.to_lowercase());
        }
    }

    /// Removes emails from the subscription set.
    pub fn unsubscribe(&mut self, emails: &[String]) {
        for email in emails {
            self.emails.remove(&email.to_lowercase());
        }
    }

    /// Returns `true` if the given event matches the subscription filter.
    ///
    /// Cycle-level events carry no email and are delivered to wildcard
    /// subscribers only.
    #[must_use]
    pub fn matches(&self, event: &MonitorEvent) -> bool {
        if self.subscribe_all {
            return true;
        }
        event.email().is_some_and(|email| self.emails.contains(email))
    }

    /// Returns the number of explicitly subscribed emails.
    #[must_use]
    pub fn count(&self) -> usize {
        self.emails.len()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::RiskCategory;
    use chrono::Utc;

    fn check_event(email: &str) -> MonitorEvent {
        MonitorEvent::CheckCompleted {
            email: email.to_string(),
            breach_count: 0,
            risk_score: 0,
            risk_category: RiskCategory::Low,
            new_breach_detected: false,
            timestamp: Utc::now(),
        }
    }

    fn cycle_event() -> MonitorEvent {
        MonitorEvent::ScanCycleCompleted {
            emails_checked: 1,
            alerts_created: 0,
            failures: 0,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn empty_matches_nothing() {
        let mgr = SubscriptionManager::new();
        assert!(!mgr.matches(&check_event("a@example.com")));
    }

    #[test]
    fn subscribe_specific_email() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&["a@example.com".to_string()], false);
        assert!(mgr.matches(&check_event("a@example.com")));
        assert!(!mgr.matches(&check_event("b@example.com")));
    }

    #[test]
    fn subscription_is_case_insensitive_on_email() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&["A@Example.COM".to_string()], false);
        assert!(mgr.matches(&check_event("a@example.com")));
    }

    #[test]
    fn wildcard_matches_everything() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[], true);
        assert!(mgr.matches(&check_event("a@example.com")));
        assert!(mgr.matches(&cycle_event()));
    }

    #[test]
    fn cycle_events_require_wildcard() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&["a@example.com".to_string()], false);
        assert!(!mgr.matches(&cycle_event()));
    }

    #[test]
    fn unsubscribe_removes_email() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&["a@example.com".to_string()], false);
        assert!(mgr.matches(&check_event("a@example.com")));
        mgr.unsubscribe(&["a@example.com".to_string()]);
        assert!(!mgr.matches(&check_event("a@example.com")));
    }

    #[test]
    fn count_tracks_explicit() {
        let mut mgr = SubscriptionManager::new();
        assert_eq!(mgr.count(), 0);
        mgr.subscribe(
            &["a@example.com".to_string(), "b@example.com".to_string()],
            false,
        );
        assert_eq!(mgr.count(), 2);
    }
}
