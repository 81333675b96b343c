//! HTTP handlers for room monitoring

use axum::{extract::State, Json};

use crate::services::monitoring::{EvaluateReadingInput, MonitoringReport, MonitoringService};
use crate::AppState;

/// Evaluate an environment reading against the crop's current targets
pub async fn evaluate_reading(
    State(state): State<AppState>,
    Json(input): Json<EvaluateReadingInput>,
) -> Json<MonitoringReport> {
    let service = MonitoringService::new(state.catalog, state.config.monitoring.clone());
    Json(service.evaluate(&input))
}
