//! Route definitions for the Cultivation Management Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Crop lifecycle
        .nest("/stages", stage_routes())
        .nest("/crops", crop_routes())
        // Nutrient formulas and schedule
        .nest("/formulas", formula_routes())
        .route("/schedule/:stage", get(handlers::get_stage_schedule))
        // Environmental targets and range checks
        .route("/parameters/:stage/:week", get(handlers::get_parameters))
        .nest("/ranges", range_routes())
        // Room monitoring
        .route("/monitoring/evaluate", post(handlers::evaluate_reading))
}

/// Stage resolution routes
fn stage_routes() -> Router<AppState> {
    Router::new().route("/resolve", post(handlers::resolve_stage))
}

/// Crop lifecycle routes
fn crop_routes() -> Router<AppState> {
    Router::new()
        .route("/transition", post(handlers::transition_crop))
        .route("/overview", post(handlers::get_crop_overview))
}

/// Formula catalog routes
fn formula_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_formulas))
        .route("/resolve", get(handlers::resolve_formula))
        .route("/:formula_id", get(handlers::get_formula))
        .route("/:formula_id/mix", get(handlers::get_tank_mix))
}

/// Range check routes
fn range_routes() -> Router<AppState> {
    Router::new()
        .route("/check", post(handlers::check_range))
        .route("/classify", post(handlers::classify_value))
}
