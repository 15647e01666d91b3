//! Alert history handler.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{AlertDto, AlertListResponse, EmailQuery};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, MonitorError};
use crate::service::normalize_email;

/// `GET /alerts?email=` — Alert history for an email, oldest first.
///
/// # Errors
///
/// Returns [`MonitorError::InvalidEmail`] for malformed input and
/// [`MonitorError::Persistence`] when the store is unavailable.
#[utoipa::path(
    get,
    path = "/api/v1/alerts",
    tag = "Alerts",
    summary = "List alerts for an email",
    params(EmailQuery),
    responses(
        (status = 200, description = "Alert history", body = AlertListResponse),
        (status = 400, description = "Malformed email address", body = ErrorResponse),
    )
)]
pub async fn list_alerts(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<impl IntoResponse, MonitorError> {
    let email = normalize_email(&query.email)?;
    let alerts = state.alert_store.list_by_email(&email).await?;
    Ok(Json(AlertListResponse {
        data: alerts.iter().map(AlertDto::from).collect(),
    }))
}

/// Alert routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/alerts", get(list_alerts))
}
