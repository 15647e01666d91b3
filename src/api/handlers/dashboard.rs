//! Dashboard view handler: latest stored result for an email.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{BreachRecordDto, DashboardResponse, EmailQuery, breaches_to_dto};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, MonitorError};
use crate::service::normalize_email;

/// `GET /dashboard?email=` — Latest stored check for an email.
///
/// An email that has never been checked returns the zero-breach shape
/// rather than a 404, so the dashboard can always render.
///
/// # Errors
///
/// Returns [`MonitorError::InvalidEmail`] for malformed input and
/// [`MonitorError::Persistence`] when the store is unavailable.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "Dashboard",
    summary = "Dashboard payload for an email",
    description = "Returns the latest stored check result, the most recently dated breach, and whether an alert banner should show.",
    params(EmailQuery),
    responses(
        (status = 200, description = "Dashboard payload", body = DashboardResponse),
        (status = 400, description = "Malformed email address", body = ErrorResponse),
    )
)]
pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<impl IntoResponse, MonitorError> {
    let email = normalize_email(&query.email)?;

    let Some(result) = state.result_store.latest(&email).await? else {
        return Ok(Json(DashboardResponse {
            email,
            breach_count: 0,
            risk_score: 0,
            risk_category: "Low".to_string(),
            most_recent_breach: None,
            breaches: Vec::new(),
            recommendations: Vec::new(),
            show_alert_banner: false,
            last_checked_at: None,
        }));
    };

    let most_recent_breach = result
        .breaches
        .iter()
        .max_by_key(|b| b.date)
        .map(BreachRecordDto::from);

    let show_alert_banner = !state.alert_store.list_by_email(&email).await?.is_empty();

    Ok(Json(DashboardResponse {
        email,
        breach_count: result.breach_count,
        risk_score: result.risk_score,
        risk_category: result.risk_category.to_string(),
        most_recent_breach,
        breaches: breaches_to_dto(&result),
        recommendations: result.recommendations.clone(),
        show_alert_banner,
        last_checked_at: Some(result.checked_at),
    }))
}

/// Dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard))
}
