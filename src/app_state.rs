//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::persistence::{AlertStore, MonitoredStore, ResultStore};
use crate::service::CheckService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Check orchestrator for all breach-check logic.
    pub check_service: Arc<CheckService>,
    /// Latest-result store for dashboard reads.
    pub result_store: Arc<dyn ResultStore>,
    /// Alert store for history reads and cascade deletes.
    pub alert_store: Arc<dyn AlertStore>,
    /// Monitored-email store.
    pub monitored_store: Arc<dyn MonitoredStore>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("check_service", &self.check_service)
            .field("event_bus", &self.event_bus)
            .finish_non_exhaustive()
    }
}
