//! Canonical breach records and the raw-entry normalizer.
//!
//! Breach sources return heterogeneous shapes: bare name strings, legacy
//! partial records, and full records in either the catalog field naming
//! (`name`, `breach_date`, `data_exposed`) or the live-source naming
//! (`Name`, `BreachDate`, `DataClasses`). [`normalize_entries`] is the
//! single boundary that collapses all of them into [`BreachRecord`]; the
//! raw union never propagates past this module.

use std::fmt;

use chrono::NaiveDate;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Exposure categories substituted when a source provides none.
pub const DEFAULT_EXPOSURE: [&str; 2] = ["Email addresses", "Passwords"];

/// Per-source exposure overrides, keyed by case-insensitive source name.
///
/// Some feeds omit category detail for sources whose exposed data is known
/// out-of-band. A matching row replaces `data_exposed` wholesale; new
/// overrides are data, not branching logic.
const SOURCE_EXPOSURE_OVERRIDES: &[(&str, &[&str])] = &[(
    "RailYatri",
    &[
        "Email addresses",
        "Genders",
        "Names",
        "Phone numbers",
        "Purchases",
    ],
)];

/// Date a breach occurred, or the unknown-date sentinel.
///
/// Wire form is `YYYY-MM-DD` for known dates and the literal `"unknown"`
/// otherwise. The raw literal `"N/A"` and unparseable strings normalize to
/// [`BreachDate::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BreachDate {
    /// No usable date was supplied by the source.
    Unknown,
    /// The date the breach occurred.
    Known(NaiveDate),
}

impl BreachDate {
    /// Parses a raw date string, degrading to [`BreachDate::Unknown`] on
    /// placeholders (`"N/A"`, empty) or malformed input.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("n/a") {
            return Self::Unknown;
        }
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_or(Self::Unknown, Self::Known)
    }

    /// Returns the date when known.
    #[must_use]
    pub const fn as_known(&self) -> Option<NaiveDate> {
        match self {
            Self::Known(date) => Some(*date),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for BreachDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl Serialize for BreachDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BreachDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Canonical breach record.
///
/// Invariants upheld by [`normalize_entries`]:
/// - `name` is non-empty (`"Unknown"` when the source omitted it).
/// - `data_exposed` is deduplicated, order-preserving, and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreachRecord {
    /// Identifier of the breach source (e.g. `"Adobe"`).
    pub name: String,
    /// Date of the breach, or the unknown sentinel.
    pub date: BreachDate,
    /// Categories of data compromised. Unknown categories pass through
    /// verbatim rather than being rejected.
    pub data_exposed: Vec<String>,
}

/// One raw entry as returned by a breach source, before normalization.
///
/// Sources emit either a bare breach name or an object with optional
/// fields. Field aliases accept both the catalog naming and the live
/// HIBP-style naming.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawBreachEntry {
    /// Legacy shape: just the breach name.
    Name(String),
    /// Partial or full record object.
    Record(RawBreachRecord),
}

/// Object form of a raw breach entry. All fields optional; missing data
/// degrades to defaults during normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBreachRecord {
    /// Source name.
    #[serde(default, alias = "Name")]
    pub name: Option<String>,
    /// Display title, used when `name` is absent.
    #[serde(default, alias = "Title")]
    pub title: Option<String>,
    /// Raw breach date string.
    #[serde(default, alias = "BreachDate")]
    pub breach_date: Option<String>,
    /// Raw exposed-data categories.
    #[serde(default, alias = "DataClasses")]
    pub data_exposed: Option<Vec<String>>,
}

/// Normalizes a sequence of raw source entries into canonical records.
///
/// No entry is ever dropped; malformed or missing fields degrade to
/// defaults. Output order preserves input order.
#[must_use]
pub fn normalize_entries(entries: Vec<RawBreachEntry>) -> Vec<BreachRecord> {
    entries.into_iter().map(normalize_entry).collect()
}

fn normalize_entry(entry: RawBreachEntry) -> BreachRecord {
    let (name, date, raw_exposed) = match entry {
        RawBreachEntry::Name(name) => (non_empty(Some(name)), BreachDate::Unknown, None),
        RawBreachEntry::Record(record) => (
            non_empty(record.name).or_else(|| non_empty(record.title)),
            record
                .breach_date
                .map_or(BreachDate::Unknown, |raw| BreachDate::parse(&raw)),
            record.data_exposed,
        ),
    };

    let name = name.unwrap_or_else(|| "Unknown".to_string());
    let data_exposed = source_override(&name).unwrap_or_else(|| normalize_exposure(raw_exposed));

    BreachRecord {
        name,
        date,
        data_exposed,
    }
}

/// Returns the override category list for sources with out-of-band data.
fn source_override(name: &str) -> Option<Vec<String>> {
    SOURCE_EXPOSURE_OVERRIDES
        .iter()
        .find(|(source, _)| source.eq_ignore_ascii_case(name))
        .map(|(_, categories)| categories.iter().map(ToString::to_string).collect())
}

/// Deduplicates categories (case-insensitive, first spelling wins) and
/// substitutes the default pair for empty or placeholder-only lists.
fn normalize_exposure(raw: Option<Vec<String>>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for category in raw.unwrap_or_default() {
        let trimmed = category.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("n/a") {
            continue;
        }
        if !seen.iter().any(|s| s.eq_ignore_ascii_case(trimmed)) {
            seen.push(trimmed.to_string());
        }
    }
    if seen.is_empty() {
        return DEFAULT_EXPOSURE.iter().map(ToString::to_string).collect();
    }
    seen
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
