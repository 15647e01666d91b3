//! Simulated breach catalog used as the fallback source.
//!
//! Reads a JSON catalog keyed by email. Unknown emails (and a missing or
//! unreadable catalog file) yield one generic record so the scoring and
//! alert pipeline stays exercisable without live credentials.

use std::path::PathBuf;

use serde::Deserialize;

use super::{BreachSource, SourceError, SourceFuture};
use crate::domain::RawBreachEntry;
use crate::domain::breach::RawBreachRecord;

/// Catalog file shape: `{"breaches": {"<email>": [<raw entries>]}}`.
#[derive(Debug, Default, Deserialize)]
struct Catalog {
    #[serde(default)]
    breaches: std::collections::HashMap<String, Vec<RawBreachEntry>>,
}

/// File-backed simulated breach source.
///
/// Never fails: catalog problems degrade to the generic record. The file
/// is re-read per lookup so the catalog can be edited while the service
/// runs.
#[derive(Debug, Clone)]
pub struct SimulatedSource {
    catalog_path: PathBuf,
}

impl SimulatedSource {
    /// Creates a source reading from the given catalog path.
    #[must_use]
    pub fn new(catalog_path: impl Into<PathBuf>) -> Self {
        Self {
            catalog_path: catalog_path.into(),
        }
    }

    async fn load(&self, email: &str) -> Vec<RawBreachEntry> {
        let raw = match tokio::fs::read_to_string(&self.catalog_path).await {
            Ok(raw) => raw,
            Err(err) => {
                tracing::debug!(path = %self.catalog_path.display(), %err, "no simulated catalog");
                return vec![generic_entry()];
            }
        };

        let catalog: Catalog = match serde_json::from_str(&raw) {
            Ok(catalog) => catalog,
            Err(err) => {
                tracing::warn!(path = %self.catalog_path.display(), %err, "simulated catalog unparseable");
                return vec![generic_entry()];
            }
        };

        match catalog.breaches.get(email) {
            Some(entries) if !entries.is_empty() => entries.clone(),
            _ => vec![generic_entry()],
        }
    }
}

impl BreachSource for SimulatedSource {
    fn lookup<'a>(&'a self, email: &'a str) -> SourceFuture<'a> {
        Box::pin(async move { Ok::<_, SourceError>(self.load(email).await) })
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}

/// Generic record returned when the catalog has nothing for an email.
fn generic_entry() -> RawBreachEntry {
    RawBreachEntry::Record(RawBreachRecord {
        name: Some("RailYatri".to_string()),
        title: None,
        breach_date: Some("2020-02-15".to_string()),
        data_exposed: Some(
            [
                "Email addresses",
                "Genders",
                "Names",
                "Phone numbers",
                "Purchases",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
        ),
    })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::normalize_entries;

    fn temp_catalog(contents: &str) -> PathBuf {
        let path =
            std::env::temp_dir().join(format!("breachwatch-catalog-{}.json", uuid::Uuid::new_v4()));
        if std::fs::write(&path, contents).is_err() {
            panic!("failed to write temp catalog");
        }
        path
    }

    #[tokio::test]
    async fn missing_catalog_yields_generic_record() {
        let source = SimulatedSource::new("/nonexistent/simulated_breaches.json");
        let Ok(entries) = source.lookup("user@example.com").await else {
            panic!("simulated source never errors");
        };
        let records = normalize_entries(entries);
        let Some(first) = records.first() else {
            panic!("one record expected");
        };
        assert_eq!(first.name, "RailYatri");
    }

    #[tokio::test]
    async fn catalog_entries_are_returned_for_known_email() {
        let path = temp_catalog(
            r#"{"breaches": {"user@example.com": [
                {"name": "Adobe", "breach_date": "2013-10-04", "data_exposed": ["Passwords"]},
                "LegacySite"
            ]}}"#,
        );
        let source = SimulatedSource::new(&path);
        let Ok(entries) = source.lookup("user@example.com").await else {
            panic!("simulated source never errors");
        };
        let records = normalize_entries(entries);
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Adobe", "LegacySite"]);
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn unknown_email_in_catalog_yields_generic_record() {
        let path = temp_catalog(r#"{"breaches": {"other@example.com": ["X"]}}"#);
        let source = SimulatedSource::new(&path);
        let Ok(entries) = source.lookup("user@example.com").await else {
            panic!("simulated source never errors");
        };
        assert_eq!(entries.len(), 1);
        let _ = std::fs::remove_file(path);
    }
}
