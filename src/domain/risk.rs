//! Deterministic risk scoring over canonical breach records.
//!
//! The scorer is a pure function of the record sequence and the `as_of`
//! date: the same inputs always produce the same score. The orchestrator
//! passes today's date; tests pass fixed dates.

use chrono::{Datelike, NaiveDate};

use super::breach::BreachRecord;
use super::check_result::RiskCategory;

/// Base contribution of the first breach, before severity scaling.
/// The i-th breach (1-indexed) contributes `BASE_POINTS / i`, so each
/// additional breach adds less than the previous one.
const BASE_POINTS: u32 = 40;

/// Severity weight rows in descending sensitivity, matched
/// case-insensitively on category substrings. The first matching row wins.
const SEVERITY_WEIGHTS: &[(&[&str], u32)] = &[
    (&["financial", "credit", "bank", "social security"], 100),
    (&["password", "hashes"], 85),
    (&["username"], 60),
];

/// Weight for breaches exposing only email addresses.
const EMAIL_ONLY_WEIGHT: u32 = 25;

/// Weight for breaches whose most sensitive category is outside the
/// ranked vocabulary (names, phone numbers, purchases, ...).
const OTHER_WEIGHT: u32 = 40;

/// Computes the risk score in `[0, 100]` for a sequence of breaches.
///
/// Zero breaches score 0. The score is monotonically non-decreasing in
/// breach count and in per-breach severity, with sub-linear growth so
/// that many low-severity breaches do not trivially saturate it.
#[must_use]
pub fn score_breaches(breaches: &[BreachRecord], as_of: NaiveDate) -> u8 {
    let mut total: u32 = 0;
    for (index, breach) in breaches.iter().enumerate() {
        let base = BASE_POINTS / (index as u32 + 1);
        let weighted = base * severity_weight(&breach.data_exposed) / 100;
        total = total
            .saturating_add(weighted)
            .saturating_add(recency_bonus(breach, as_of));
    }
    total.min(100) as u8
}

/// Scores and buckets in one step.
#[must_use]
pub fn score_and_categorize(breaches: &[BreachRecord], as_of: NaiveDate) -> (u8, RiskCategory) {
    let score = score_breaches(breaches, as_of);
    (score, RiskCategory::from_score(score))
}

/// Returns the weight of the most sensitive category present.
#[must_use]
pub fn severity_weight(categories: &[String]) -> u32 {
    for (needles, weight) in SEVERITY_WEIGHTS {
        if categories
            .iter()
            .any(|c| contains_any(&c.to_lowercase(), needles))
        {
            return *weight;
        }
    }
    if categories
        .iter()
        .all(|c| c.to_lowercase().contains("email"))
    {
        EMAIL_ONLY_WEIGHT
    } else {
        OTHER_WEIGHT
    }
}

/// Recency bonus by breach age in whole years. Unknown dates are neutral:
/// no bonus, no penalty.
fn recency_bonus(breach: &BreachRecord, as_of: NaiveDate) -> u32 {
    let Some(date) = breach.date.as_known() else {
        return 0;
    };
    let age = (as_of.year() - date.year()).max(0);
    match age {
        0..=1 => 15,
        2..=3 => 8,
        4..=5 => 4,
        _ => 0,
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::breach::BreachDate;

    fn date(s: &str) -> NaiveDate {
        let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") else {
            panic!("valid date literal");
        };
        d
    }

    fn breach(name: &str, raw_date: &str, categories: &[&str]) -> BreachRecord {
        BreachRecord {
            name: name.to_string(),
            date: BreachDate::parse(raw_date),
            data_exposed: categories.iter().map(ToString::to_string).collect(),
        }
    }

    const AS_OF: &str = "2026-08-01";

    #[test]
    fn zero_breaches_scores_zero_low() {
        let (score, category) = score_and_categorize(&[], date(AS_OF));
        assert_eq!(score, 0);
        assert_eq!(category, RiskCategory::Low);
    }

    #[test]
    fn score_is_clamped_to_hundred() {
        let breaches: Vec<BreachRecord> = (0..30)
            .map(|i| breach(&format!("B{i}"), "2026-01-01", &["Financial info"]))
            .collect();
        let score = score_breaches(&breaches, date(AS_OF));
        assert!(score <= 100);
        assert_eq!(score, 100);
    }

    #[test]
    fn score_is_monotonic_in_breach_count() {
        let mut breaches = Vec::new();
        let mut previous = 0;
        for i in 0..12 {
            breaches.push(breach(&format!("B{i}"), "N/A", &["Passwords"]));
            let score = score_breaches(&breaches, date(AS_OF));
            assert!(score >= previous, "score dropped when a breach was added");
            previous = score;
        }
    }

    #[test]
    fn each_additional_breach_contributes_less() {
        let one = score_breaches(&[breach("A", "N/A", &["Passwords"])], date(AS_OF));
        let two = score_breaches(
            &[
                breach("A", "N/A", &["Passwords"]),
                breach("B", "N/A", &["Passwords"]),
            ],
            date(AS_OF),
        );
        let first_delta = two - one;
        assert!(u32::from(first_delta) < u32::from(one));
    }

    #[test]
    fn severity_ordering_matches_weight_table() {
        let financial = severity_weight(&["Financial info".to_string()]);
        let password = severity_weight(&["Passwords".to_string()]);
        let username = severity_weight(&["Usernames".to_string()]);
        let email_only = severity_weight(&["Email addresses".to_string()]);
        assert!(financial > password);
        assert!(password > username);
        assert!(username > email_only);
    }

    #[test]
    fn most_sensitive_category_wins() {
        let mixed = severity_weight(&[
            "Email addresses".to_string(),
            "Passwords".to_string(),
            "Financial info".to_string(),
        ]);
        assert_eq!(mixed, severity_weight(&["Financial info".to_string()]));
    }

    #[test]
    fn recent_breach_outscores_old_identical_breach() {
        let recent = score_breaches(&[breach("A", "2026-01-01", &["Passwords"])], date(AS_OF));
        let old = score_breaches(&[breach("A", "2013-10-04", &["Passwords"])], date(AS_OF));
        assert!(recent > old);
    }

    #[test]
    fn unknown_date_is_neutral() {
        let unknown = score_breaches(&[breach("A", "N/A", &["Passwords"])], date(AS_OF));
        let old = score_breaches(&[breach("A", "2010-01-01", &["Passwords"])], date(AS_OF));
        assert_eq!(unknown, old);
    }

    #[test]
    fn single_old_password_breach_lands_in_medium() {
        // One breach, password exposure, old date: 40 * 85% = 34.
        let (score, category) = score_and_categorize(
            &[breach("Adobe", "2013-10-04", &["Email", "Password"])],
            date(AS_OF),
        );
        assert_eq!(score, 34);
        assert_eq!(category, RiskCategory::Medium);
    }

    #[test]
    fn email_only_breaches_stay_low() {
        let breaches: Vec<BreachRecord> = (0..5)
            .map(|i| breach(&format!("B{i}"), "N/A", &["Email addresses"]))
            .collect();
        let (_, category) = score_and_categorize(&breaches, date(AS_OF));
        assert_eq!(category, RiskCategory::Low);
    }

    #[test]
    fn scoring_is_deterministic() {
        let breaches = vec![
            breach("A", "2020-02-15", &["Passwords", "Usernames"]),
            breach("B", "N/A", &["Email addresses"]),
        ];
        let first = score_breaches(&breaches, date(AS_OF));
        let second = score_breaches(&breaches, date(AS_OF));
        assert_eq!(first, second);
    }
}
