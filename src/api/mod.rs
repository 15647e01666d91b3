//! REST API layer: route handlers, DTOs, and router composition.
//!
//! All endpoints are mounted under `/api/v1`. With the `swagger-ui`
//! feature (default) an interactive OpenAPI explorer is served at
//! `/docs`.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document covering all REST endpoints.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "breachwatch",
        description = "Email breach monitoring, risk scoring, and alerting"
    ),
    paths(
        handlers::check::run_check,
        handlers::dashboard::dashboard,
        handlers::monitored::list_monitored,
        handlers::monitored::add_monitored,
        handlers::monitored::remove_monitored,
        handlers::alerts::list_alerts,
        handlers::system::health_handler,
        handlers::system::exposure_tiers_handler,
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/docs")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}
