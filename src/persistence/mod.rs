//! Persistence layer: check results, alert events, and monitored emails.
//!
//! Defines the store ports consumed by the service layer and two
//! implementations: [`postgres::PostgresStore`] (sqlx) for durable
//! deployments and [`memory::MemoryStore`] for tests and
//! `PERSISTENCE_ENABLED=false` runs.
//!
//! The ports use `Pin<Box<dyn Future>>` return types so they are
//! dyn-compatible (`Arc<dyn ResultStore>` etc.).

pub mod memory;
pub mod postgres;

use std::future::Future;
use std::pin::Pin;

use crate::domain::{AlertEvent, CheckResult};
use crate::error::MonitorError;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Boxed future returned by the store ports.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, MonitorError>> + Send + 'a>>;

/// Store of the latest check result per email.
///
/// Exactly one row per email: [`ResultStore::save`] overwrites the
/// previous result. The read-then-write window is serialized by the
/// orchestrator's per-email lock, not by the store.
pub trait ResultStore: Send + Sync {
    /// Returns the last persisted result for `email`, if any.
    fn latest<'a>(&'a self, email: &'a str) -> StoreFuture<'a, Option<CheckResult>>;

    /// Persists `result`, overwriting any previous row for its email.
    fn save<'a>(&'a self, result: &'a CheckResult) -> StoreFuture<'a, ()>;
}

/// Append-only store of alert events.
pub trait AlertStore: Send + Sync {
    /// Appends an immutable alert event.
    fn append<'a>(&'a self, alert: &'a AlertEvent) -> StoreFuture<'a, ()>;

    /// Returns all alerts for `email`, oldest first.
    fn list_by_email<'a>(&'a self, email: &'a str) -> StoreFuture<'a, Vec<AlertEvent>>;

    /// Deletes all alerts for `email`, returning the number removed.
    /// Used by the monitored-email cascade.
    fn delete_by_email<'a>(&'a self, email: &'a str) -> StoreFuture<'a, u64>;
}

/// Store of the monitored-email set.
pub trait MonitoredStore: Send + Sync {
    /// Adds `email` to the monitored set (idempotent).
    fn add<'a>(&'a self, email: &'a str) -> StoreFuture<'a, ()>;

    /// Removes `email`; returns `false` if it was not monitored.
    fn remove<'a>(&'a self, email: &'a str) -> StoreFuture<'a, bool>;

    /// Returns all monitored emails in lexicographic order.
    fn list(&self) -> StoreFuture<'_, Vec<String>>;
}
