//! Remediation recommendations derived from exposed-data categories.

use super::breach::BreachRecord;

/// Fixed priority table: password guidance first, then financial, then
/// the generic email-only warning, then the username+password combination.
/// Each row emits its text once when the trigger matches.
const RULES: &[(fn(&[String]) -> bool, &str)] = &[
    (has_password, "Reset password immediately and enable 2FA."),
    (has_financial, "Monitor bank statements and card activity."),
    (
        email_only,
        "Beware of phishing attempts and suspicious emails.",
    ),
    (
        username_password_combo,
        "Change passwords across platforms and avoid reuse.",
    ),
];

/// Emitted when breaches exist but no table row triggered.
const GENERIC: &str = "Review account security settings and enable 2FA where possible.";

/// Returns the ordered union of distinct categories across all records,
/// compared case-insensitively with the first spelling kept.
#[must_use]
pub fn distinct_categories(breaches: &[BreachRecord]) -> Vec<String> {
    let mut union: Vec<String> = Vec::new();
    for breach in breaches {
        for category in &breach.data_exposed {
            if !union.iter().any(|c| c.eq_ignore_ascii_case(category)) {
                union.push(category.clone());
            }
        }
    }
    union
}

/// Builds the ordered, deduplicated recommendation list for a category set.
///
/// An empty category set (no breaches) yields an empty list. A non-empty
/// set that matches no rule yields the generic account-security line, so
/// a breached account never gets an empty remediation plan.
#[must_use]
pub fn recommendations_for(categories: &[String]) -> Vec<String> {
    if categories.is_empty() {
        return Vec::new();
    }

    let lowered: Vec<String> = categories.iter().map(|c| c.to_lowercase()).collect();
    let mut recommendations: Vec<String> = RULES
        .iter()
        .filter(|(trigger, _)| trigger(&lowered))
        .map(|(_, text)| (*text).to_string())
        .collect();

    if recommendations.is_empty() {
        recommendations.push(GENERIC.to_string());
    }
    recommendations
}

fn has_password(categories: &[String]) -> bool {
    categories
        .iter()
        .any(|c| c.contains("password") || c.contains("hashes"))
}

fn has_financial(categories: &[String]) -> bool {
    categories
        .iter()
        .any(|c| c.contains("financial") || c.contains("credit") || c.contains("bank"))
}

fn email_only(categories: &[String]) -> bool {
    categories.iter().all(|c| c.contains("email"))
}

fn username_password_combo(categories: &[String]) -> bool {
    categories.iter().any(|c| c.contains("username")) && has_password(categories)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::breach::BreachDate;

    fn cats(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn empty_categories_yield_no_recommendations() {
        assert!(recommendations_for(&[]).is_empty());
    }

    #[test]
    fn password_exposure_yields_reset_guidance() {
        let recs = recommendations_for(&cats(&["Email", "Password"]));
        let Some(first) = recs.first() else {
            panic!("expected at least one recommendation");
        };
        assert!(first.contains("Reset password"));
    }

    #[test]
    fn financial_exposure_yields_statement_monitoring() {
        let recs = recommendations_for(&cats(&["Financial info"]));
        assert!(recs.iter().any(|r| r.contains("bank statements")));
    }

    #[test]
    fn email_only_yields_phishing_warning() {
        let recs = recommendations_for(&cats(&["Email addresses"]));
        assert_eq!(
            recs,
            vec!["Beware of phishing attempts and suspicious emails.".to_string()]
        );
    }

    #[test]
    fn username_password_combo_adds_reuse_warning() {
        let recs = recommendations_for(&cats(&["Usernames", "Passwords"]));
        assert!(recs.iter().any(|r| r.contains("avoid reuse")));
        // Password rule still fires first.
        let Some(first) = recs.first() else {
            panic!("expected recommendations");
        };
        assert!(first.contains("Reset password"));
    }

    #[test]
    fn unmatched_categories_get_generic_guidance() {
        let recs = recommendations_for(&cats(&["Phone numbers", "Genders"]));
        assert_eq!(recs, vec![GENERIC.to_string()]);
    }

    #[test]
    fn output_is_deduplicated_and_order_stable() {
        let categories = cats(&["Passwords", "Financial info", "Usernames"]);
        let first = recommendations_for(&categories);
        let second = recommendations_for(&categories);
        assert_eq!(first, second);

        let mut deduped = first.clone();
        deduped.dedup();
        assert_eq!(first, deduped);
    }

    #[test]
    fn distinct_categories_unions_across_breaches() {
        let breaches = vec![
            BreachRecord {
                name: "A".to_string(),
                date: BreachDate::Unknown,
                data_exposed: cats(&["Passwords", "Email addresses"]),
            },
            BreachRecord {
                name: "B".to_string(),
                date: BreachDate::Unknown,
                data_exposed: cats(&["passwords", "Phone numbers"]),
            },
        ];
        assert_eq!(
            distinct_categories(&breaches),
            cats(&["Passwords", "Email addresses", "Phone numbers"])
        );
    }
}
