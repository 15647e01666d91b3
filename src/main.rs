//! breachwatch server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints and
//! spawns the periodic monitoring loop.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use breachwatch::alerting::{AlertDispatch, LogDispatch, SmtpDispatch};
use breachwatch::api;
use breachwatch::app_state::AppState;
use breachwatch::config::MonitorConfig;
use breachwatch::domain::EventBus;
use breachwatch::persistence::{
    AlertStore, MemoryStore, MonitoredStore, PostgresStore, ResultStore,
};
use breachwatch::service::{CheckService, MonitorService};
use breachwatch::source::{BreachSource, HibpSource, SimulatedSource};
use breachwatch::ws::handler::ws_handler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = MonitorConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting breachwatch");

    // Breach sources: the simulated catalog is always the fallback, and
    // becomes the primary when simulation is preferred or no API key is
    // configured.
    let simulated = Arc::new(SimulatedSource::new(config.simulated_data_path.clone()));
    let fallback: Arc<dyn BreachSource> = Arc::clone(&simulated) as Arc<dyn BreachSource>;
    let primary: Arc<dyn BreachSource> =
        if config.use_simulated_data || config.hibp_api_key.is_empty() {
            tracing::info!("using simulated breach catalog as primary source");
            Arc::clone(&simulated) as Arc<dyn BreachSource>
        } else {
            Arc::new(HibpSource::new(
                &config.hibp_api_key,
                &config.hibp_user_agent,
                config.source_timeout,
            )?)
        };

    // Stores
    let (result_store, alert_store, monitored_store): (
        Arc<dyn ResultStore>,
        Arc<dyn AlertStore>,
        Arc<dyn MonitoredStore>,
    ) = if config.persistence_enabled {
        let store = Arc::new(PostgresStore::connect(&config).await?);
        tracing::info!("postgres persistence enabled");
        (
            Arc::clone(&store) as Arc<dyn ResultStore>,
            Arc::clone(&store) as Arc<dyn AlertStore>,
            store as Arc<dyn MonitoredStore>,
        )
    } else {
        let store = Arc::new(MemoryStore::new());
        tracing::warn!("persistence disabled; results will not survive restart");
        (
            Arc::clone(&store) as Arc<dyn ResultStore>,
            Arc::clone(&store) as Arc<dyn AlertStore>,
            store as Arc<dyn MonitoredStore>,
        )
    };

    // Alert dispatch
    let dispatch: Arc<dyn AlertDispatch> = if config.smtp_configured() {
        Arc::new(SmtpDispatch::new(
            &config.smtp_host,
            config.smtp_port,
            &config.smtp_username,
            &config.smtp_password,
            &config.alert_email_from,
        )?)
    } else {
        tracing::info!("smtp not configured; alerts will be logged only");
        Arc::new(LogDispatch)
    };

    // Build service layer
    let event_bus = EventBus::new(config.event_bus_capacity);
    let check_service = Arc::new(CheckService::new(
        primary,
        fallback,
        Arc::clone(&result_store),
        Arc::clone(&alert_store),
        dispatch,
        event_bus.clone(),
        config.source_timeout,
    ));

    // Spawn the periodic monitor; the sender keeps the loop alive until
    // the server exits.
    let shutdown_tx = if config.monitor_enabled {
        let (tx, rx) = tokio::sync::watch::channel(false);
        let monitor = Arc::new(MonitorService::new(
            Arc::clone(&check_service),
            Arc::clone(&monitored_store),
            event_bus.clone(),
            config.scan_interval,
        ));
        monitor.spawn(rx);
        tracing::info!(interval_secs = config.scan_interval.as_secs(), "monitor loop started");
        Some(tx)
    } else {
        None
    };

    // Build application state
    let app_state = AppState {
        check_service,
        result_store,
        alert_store,
        monitored_store,
        event_bus,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    drop(shutdown_tx);
    Ok(())
}
