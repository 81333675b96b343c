//! HTTP handlers for PNO parameter and range endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use shared::{PnoParameterSet, Stage};

use crate::error::AppResult;
use crate::services::parameters::{
    ClassifyInput, ClassifyResult, ParameterService, RangeCheckInput, RangeCheckResult,
};
use crate::AppState;

/// Environmental targets for a stage and week
pub async fn get_parameters(
    State(state): State<AppState>,
    Path((stage, week)): Path<(Stage, u32)>,
) -> AppResult<Json<PnoParameterSet>> {
    let service = ParameterService::new(state.catalog);
    let parameters = service.get(stage, week)?;
    Ok(Json(parameters))
}

/// Check whether a value is out of range
pub async fn check_range(
    State(state): State<AppState>,
    Json(input): Json<RangeCheckInput>,
) -> AppResult<Json<RangeCheckResult>> {
    let service = ParameterService::new(state.catalog);
    let result = service.check(&input)?;
    Ok(Json(result))
}

/// Classify a value as in_range, warning or danger
pub async fn classify_value(
    State(state): State<AppState>,
    Json(input): Json<ClassifyInput>,
) -> AppResult<Json<ClassifyResult>> {
    let service = ParameterService::new(state.catalog);
    let result = service.classify(&input)?;
    Ok(Json(result))
}
