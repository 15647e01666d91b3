//! Fine-grained per-email locking for the check read-modify-write window.
//!
//! Concurrent checks for the *same* email race on load-previous →
//! delta → save; the delta is only correct against a completed prior
//! write. [`EmailLocks`] hands out one async mutex per email so those
//! windows serialize, while checks for different emails never contend.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// Keyed mutex map: one lock per email address.
#[derive(Debug, Default)]
pub struct EmailLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl EmailLocks {
    /// Creates an empty lock map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock for `email`, creating it on first use.
    ///
    /// The returned guard is owned, so it can be held across await points
    /// while the map lock itself is released immediately.
    pub async fn acquire(&self, email: &str) -> OwnedMutexGuard<()> {
        let entry = {
            let mut map = self.locks.lock().await;
            Arc::clone(map.entry(email.to_string()).or_default())
        };
        entry.lock_owned().await
    }
}
