//! In-memory store implementation.
//!
//! Backs tests and `PERSISTENCE_ENABLED=false` runs. Uses
//! `RwLock<HashMap>`/`RwLock<BTreeMap>` so reads on different keys do not
//! contend; nothing survives a restart.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{AlertStore, MonitoredStore, ResultStore, StoreFuture};
use crate::domain::{AlertEvent, CheckResult};

/// Volatile implementation of all three store ports.
#[derive(Debug, Default)]
pub struct MemoryStore {
    checks: RwLock<HashMap<String, CheckResult>>,
    alerts: RwLock<HashMap<String, Vec<AlertEvent>>>,
    monitored: RwLock<BTreeMap<String, DateTime<Utc>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultStore for MemoryStore {
    fn latest<'a>(&'a self, email: &'a str) -> StoreFuture<'a, Option<CheckResult>> {
        Box::pin(async move { Ok(self.checks.read().await.get(email).cloned()) })
    }

    fn save<'a>(&'a self, result: &'a CheckResult) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.checks
                .write()
                .await
                .insert(result.email.clone(), result.clone());
            Ok(())
        })
    }
}

impl AlertStore for MemoryStore {
    fn append<'a>(&'a self, alert: &'a AlertEvent) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.alerts
                .write()
                .await
                .entry(alert.email.clone())
                .or_default()
                .push(alert.clone());
            Ok(())
        })
    }

    fn list_by_email<'a>(&'a self, email: &'a str) -> StoreFuture<'a, Vec<AlertEvent>> {
        Box::pin(async move {
            Ok(self
                .alerts
                .read()
                .await
                .get(email)
                .cloned()
                .unwrap_or_default())
        })
    }

    fn delete_by_email<'a>(&'a self, email: &'a str) -> StoreFuture<'a, u64> {
        Box::pin(async move {
            let removed = self.alerts.write().await.remove(email);
            Ok(removed.map_or(0, |v| v.len() as u64))
        })
    }
}

impl MonitoredStore for MemoryStore {
    fn add<'a>(&'a self, email: &'a str) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.monitored
                .write()
                .await
                .entry(email.to_string())
                .or_insert_with(Utc::now);
            Ok(())
        })
    }

    fn remove<'a>(&'a self, email: &'a str) -> StoreFuture<'a, bool> {
        Box::pin(async move { Ok(self.monitored.write().await.remove(email).is_some()) })
    }

    fn list(&self) -> StoreFuture<'_, Vec<String>> {
        Box::pin(async move { Ok(self.monitored.read().await.keys().cloned().collect()) })
    }
}
