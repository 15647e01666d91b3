//! Scored result of a single breach check.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::breach::BreachRecord;

/// Risk bucket derived from the numeric score.
///
/// Pure function of the score; boundaries are fixed and non-configurable:
/// `[0,30]` → Low, `(30,70]` → Medium, `(70,100]` → High.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskCategory {
    /// Score in `[0, 30]`.
    Low,
    /// Score in `(30, 70]`.
    Medium,
    /// Score in `(70, 100]`.
    High,
}

impl RiskCategory {
    /// Maps a clamped score to its category.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score <= 30 {
            Self::Low
        } else if score <= 70 {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// Stable lowercase label for logs and wire payloads.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Complete scored result of one check invocation.
///
/// Created per check, persisted keyed by email (overwriting the previous
/// result for that address) after the delta comparison has run. The
/// orchestrator never retains one across invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Normalized (trimmed, lowercased) address that was checked.
    pub email: String,
    /// When the check ran.
    pub checked_at: DateTime<Utc>,
    /// Number of breach records; always equals `breaches.len()`.
    pub breach_count: u32,
    /// Canonical breach records in source order.
    pub breaches: Vec<BreachRecord>,
    /// Deterministic risk score in `[0, 100]`.
    pub risk_score: u8,
    /// Category derived from `risk_score`.
    pub risk_category: RiskCategory,
    /// Ordered, deduplicated remediation recommendations.
    pub recommendations: Vec<String>,
}

impl CheckResult {
    /// Iterates the breach source names in this result.
    pub fn breach_names(&self) -> impl Iterator<Item = &str> {
        self.breaches.iter().map(|b| b.name.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn category_boundaries_are_exact() {
        assert_eq!(RiskCategory::from_score(0), RiskCategory::Low);
        assert_eq!(RiskCategory::from_score(30), RiskCategory::Low);
        assert_eq!(RiskCategory::from_score(31), RiskCategory::Medium);
        assert_eq!(RiskCategory::from_score(70), RiskCategory::Medium);
        assert_eq!(RiskCategory::from_score(71), RiskCategory::High);
        assert_eq!(RiskCategory::from_score(100), RiskCategory::High);
    }

    #[test]
    fn categories_are_ordered_by_severity() {
        assert!(RiskCategory::Low < RiskCategory::Medium);
        assert!(RiskCategory::Medium < RiskCategory::High);
    }

    #[test]
    fn display_matches_wire_labels() {
        assert_eq!(RiskCategory::Low.to_string(), "Low");
        assert_eq!(RiskCategory::Medium.to_string(), "Medium");
        assert_eq!(RiskCategory::High.to_string(), "High");
    }
}
