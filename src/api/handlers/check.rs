//! Breach-check handler.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{CheckRequest, CheckResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, MonitorError};

/// `POST /checks` — Run a breach check for an email address.
///
/// Source failures are absorbed by the fallback source; store failures
/// degrade the `persisted`/`alertCreated` flags instead of failing the
/// request. Only a malformed email is a hard 400.
///
/// # Errors
///
/// Returns [`MonitorError::InvalidEmail`] for malformed input and
/// [`MonitorError::Source`] if both breach sources are down.
#[utoipa::path(
    post,
    path = "/api/v1/checks",
    tag = "Checks",
    summary = "Check an email for breaches",
    description = "Looks the address up in the breach sources, scores the risk, detects newly observed breaches relative to the last stored result, and stores the outcome.",
    request_body = CheckRequest,
    responses(
        (status = 200, description = "Check completed", body = CheckResponse),
        (status = 400, description = "Malformed email address", body = ErrorResponse),
        (status = 502, description = "All breach sources unavailable", body = ErrorResponse),
    )
)]
pub async fn run_check(
    State(state): State<AppState>,
    Json(req): Json<CheckRequest>,
) -> Result<impl IntoResponse, MonitorError> {
    let outcome = state.check_service.check(&req.email).await?;
    Ok(Json(CheckResponse::from(&outcome)))
}

/// Check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/checks", post(run_check))
}
