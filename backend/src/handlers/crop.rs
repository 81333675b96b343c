//! HTTP handlers for crop lifecycle endpoints

use axum::{extract::State, Json};
use shared::{Crop, StageInfo};

use crate::error::AppResult;
use crate::services::crop::{CropOverview, CropService, ResolveStageInput, TransitionInput};
use crate::AppState;

/// Resolve the current stage of a crop
pub async fn resolve_stage(
    State(state): State<AppState>,
    Json(input): Json<ResolveStageInput>,
) -> Json<StageInfo> {
    let service = CropService::new(state.catalog);
    Json(service.resolve(&input))
}

/// Record a stage transition and return the updated crop
pub async fn transition_crop(
    State(state): State<AppState>,
    Json(input): Json<TransitionInput>,
) -> AppResult<Json<Crop>> {
    let service = CropService::new(state.catalog);
    let crop = service.transition(input)?;
    Ok(Json(crop))
}

/// Stage, formula and targets for the crop's current week
pub async fn get_crop_overview(
    State(state): State<AppState>,
    Json(input): Json<ResolveStageInput>,
) -> Json<CropOverview> {
    let service = CropService::new(state.catalog);
    Json(service.overview(&input))
}
