//! System endpoints: health check and scoring catalog.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::domain::risk::severity_weight;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Severity tier info for one exposure-category group.
#[derive(Debug, Serialize, ToSchema)]
struct ExposureTierInfo {
    tier: &'static str,
    description: &'static str,
    example_category: &'static str,
    weight: u32,
}

/// `GET /config/exposure-tiers` — Severity weights used by the scorer.
#[utoipa::path(
    get,
    path = "/config/exposure-tiers",
    tag = "System",
    summary = "List exposure severity tiers",
    description = "Returns the severity weight applied per breach for each exposure-category tier, most sensitive first.",
    responses(
        (status = 200, description = "Severity tier catalog", body = Vec<ExposureTierInfo>),
    )
)]
pub async fn exposure_tiers_handler() -> impl IntoResponse {
    let examples = [
        (
            "financial",
            "Financial account or payment card data",
            "Financial info",
        ),
        ("password", "Passwords or password hashes", "Passwords"),
        ("username", "Usernames without passwords", "Usernames"),
        (
            "other",
            "Personal data outside the ranked vocabulary",
            "Phone numbers",
        ),
        ("email-only", "Email addresses and nothing else", "Email addresses"),
    ];

    let tiers: Vec<ExposureTierInfo> = examples
        .into_iter()
        .map(|(tier, description, example)| ExposureTierInfo {
            tier,
            description,
            example_category: example,
            weight: severity_weight(&[example.to_string()]),
        })
        .collect();

    (StatusCode::OK, Json(tiers))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/exposure-tiers", get(exposure_tiers_handler))
}
