//! Cultivation Management Platform - Backend Server
//!
//! Crop stage tracking, nutrient formula scheduling and environmental
//! target checks for indoor cultivation rooms.

use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod catalog;
mod config;
mod error;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use catalog::SchedulingCatalog;
use error::AppError;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<SchedulingCatalog>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cultivation_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Cultivation Management Server");
    tracing::info!("Environment: {}", config.environment);

    check_tolerances(&config)?;
    let catalog = SchedulingCatalog::load(&config.catalog)?;

    // Create application state
    let state = AppState {
        config: Arc::new(config.clone()),
        catalog: Arc::new(catalog),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let host: std::net::IpAddr = config
        .server
        .host
        .parse()
        .map_err(|_| AppError::Configuration(format!("invalid host {}", config.server.host)))?;
    let addr = SocketAddr::from((host, config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Reject monitoring tolerances that would make classification meaningless
fn check_tolerances(config: &Config) -> Result<(), AppError> {
    for kind in shared::ParameterKind::ALL {
        let tolerance = config.monitoring.for_kind(kind);
        shared::validate_tolerances(tolerance.warning, tolerance.danger)
            .map_err(|msg| AppError::Configuration(format!("monitoring.{:?}: {}", kind, msg)))?;
    }
    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Cultivation Management Platform API v1.0"
}
