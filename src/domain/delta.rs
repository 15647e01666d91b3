//! Breach-delta detection between consecutive check results.
//!
//! A pure set-difference over breach names: the previous result is passed
//! in explicitly rather than read from ambient state, so the detector is
//! trivially testable and the orchestrator controls the read-modify-write
//! window.

use std::collections::HashSet;

use super::check_result::CheckResult;

/// Returns the breach names present in `current` but absent from
/// `previous`, in `current`'s order.
///
/// With no previous result (first check ever) every current name is new.
/// Disappearance of a breach name is not an event: a cycle that removes
/// one source and adds another still reports exactly the added names.
#[must_use]
pub fn detect_new_breaches(current: &CheckResult, previous: Option<&CheckResult>) -> Vec<String> {
    let known: HashSet<&str> = previous
        .map(|p| p.breach_names().collect())
        .unwrap_or_default();

    let mut new_names: Vec<String> = Vec::new();
    for name in current.breach_names() {
        if !known.contains(name) && !new_names.iter().any(|n| n == name) {
            new_names.push(name.to_string());
        }
    }
    new_names
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::breach::{BreachDate, BreachRecord};
    use crate::domain::check_result::RiskCategory;

    fn result_with(names: &[&str]) -> CheckResult {
        CheckResult {
            email: "user@example.com".to_string(),
            checked_at: chrono::Utc::now(),
            breach_count: names.len() as u32,
            breaches: names
                .iter()
                .map(|n| BreachRecord {
                    name: (*n).to_string(),
                    date: BreachDate::Unknown,
                    data_exposed: vec!["Passwords".to_string()],
                })
                .collect(),
            risk_score: 0,
            risk_category: RiskCategory::Low,
            recommendations: Vec::new(),
        }
    }

    #[test]
    fn no_previous_and_no_breaches_detects_nothing() {
        let current = result_with(&[]);
        assert!(detect_new_breaches(&current, None).is_empty());
    }

    #[test]
    fn no_previous_with_breaches_detects_all() {
        let current = result_with(&["A", "B"]);
        assert_eq!(
            detect_new_breaches(&current, None),
            vec!["A".to_string(), "B".to_string()]
        );
    }

    #[test]
    fn identical_name_sets_detect_nothing() {
        let previous = result_with(&["A", "B"]);
        let current = result_with(&["A", "B"]);
        assert!(detect_new_breaches(&current, Some(&previous)).is_empty());
    }

    #[test]
    fn added_name_is_detected() {
        let previous = result_with(&["A", "B"]);
        let current = result_with(&["A", "B", "C"]);
        assert_eq!(
            detect_new_breaches(&current, Some(&previous)),
            vec!["C".to_string()]
        );
    }

    #[test]
    fn removed_name_is_not_an_event() {
        let previous = result_with(&["A", "B"]);
        let current = result_with(&["A"]);
        assert!(detect_new_breaches(&current, Some(&previous)).is_empty());
    }

    #[test]
    fn simultaneous_add_and_remove_reports_only_the_addition() {
        let previous = result_with(&["A", "B"]);
        let current = result_with(&["A", "C"]);
        assert_eq!(
            detect_new_breaches(&current, Some(&previous)),
            vec!["C".to_string()]
        );
    }

    #[test]
    fn duplicate_current_names_are_reported_once() {
        let previous = result_with(&["A"]);
        let current = result_with(&["A", "C", "C"]);
        assert_eq!(
            detect_new_breaches(&current, Some(&previous)),
            vec!["C".to_string()]
        );
    }
}
