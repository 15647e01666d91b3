//! REST endpoint handlers organized by resource.

pub mod alerts;
pub mod check;
pub mod dashboard;
pub mod monitored;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(check::routes())
        .merge(dashboard::routes())
        .merge(monitored::routes())
        .merge(alerts::routes())
}
