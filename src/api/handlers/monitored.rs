//! Monitored-email management handlers.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{
    AddMonitoredRequest, AddMonitoredResponse, CheckResponse, MonitoredListResponse,
};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, MonitorError};
use crate::service::normalize_email;

/// `GET /monitored` — List monitored emails.
///
/// # Errors
///
/// Returns [`MonitorError::Persistence`] when the store is unavailable.
#[utoipa::path(
    get,
    path = "/api/v1/monitored",
    tag = "Monitored",
    summary = "List monitored emails",
    responses(
        (status = 200, description = "Monitored email list", body = MonitoredListResponse),
    )
)]
pub async fn list_monitored(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, MonitorError> {
    let emails = state.monitored_store.list().await?;
    Ok(Json(MonitoredListResponse { emails }))
}

/// `POST /monitored` — Start monitoring an email.
///
/// Runs an immediate breach check after the add so the caller gets a
/// first result without waiting for the next cycle; a failure of that
/// check does not fail the add.
///
/// # Errors
///
/// Returns [`MonitorError::InvalidEmail`] for malformed input and
/// [`MonitorError::Persistence`] when the store is unavailable.
#[utoipa::path(
    post,
    path = "/api/v1/monitored",
    tag = "Monitored",
    summary = "Add a monitored email",
    request_body = AddMonitoredRequest,
    responses(
        (status = 200, description = "Email monitored; immediate check attached when it succeeded", body = AddMonitoredResponse),
        (status = 400, description = "Malformed email address", body = ErrorResponse),
    )
)]
pub async fn add_monitored(
    State(state): State<AppState>,
    Json(req): Json<AddMonitoredRequest>,
) -> Result<impl IntoResponse, MonitorError> {
    let email = normalize_email(&req.email)?;
    state.monitored_store.add(&email).await?;

    let breach_check = match state.check_service.check(&email).await {
        Ok(outcome) => Some(CheckResponse::from(&outcome)),
        Err(err) => {
            tracing::warn!(%email, %err, "immediate check after add failed");
            None
        }
    };

    let emails = state.monitored_store.list().await?;
    Ok(Json(AddMonitoredResponse {
        emails,
        breach_check,
    }))
}

/// `DELETE /monitored/{email}` — Stop monitoring an email.
///
/// Cascades to that email's alert records: alerts are deleted, the last
/// stored check result is left in place (no recomputation).
///
/// # Errors
///
/// Returns [`MonitorError::MonitoredNotFound`] when the email is not in
/// the monitored set and [`MonitorError::Persistence`] when the store is
/// unavailable.
#[utoipa::path(
    delete,
    path = "/api/v1/monitored/{email}",
    tag = "Monitored",
    summary = "Remove a monitored email",
    params(
        ("email" = String, Path, description = "Monitored email address"),
    ),
    responses(
        (status = 200, description = "Email removed; remaining list returned", body = MonitoredListResponse),
        (status = 404, description = "Email was not monitored", body = ErrorResponse),
    )
)]
pub async fn remove_monitored(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, MonitorError> {
    let email = normalize_email(&email)?;

    if !state.monitored_store.remove(&email).await? {
        return Err(MonitorError::MonitoredNotFound(email));
    }

    let removed_alerts = state.alert_store.delete_by_email(&email).await?;
    tracing::info!(%email, removed_alerts, "monitored email removed");

    let emails = state.monitored_store.list().await?;
    Ok(Json(MonitoredListResponse { emails }))
}

/// Monitored-email routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/monitored", get(list_monitored).post(add_monitored))
        .route("/monitored/{email}", axum::routing::delete(remove_monitored))
}
