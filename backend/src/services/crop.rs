//! Crop lifecycle service: stage resolution, transitions and overviews

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{
    resolve_formula, resolve_parameters_in, resolve_stage, resolve_stage_now, validate_crop_name,
    validate_transition_order, Crop, Formula, PnoParameterSet, Stage, StageInfo,
};

use crate::catalog::SchedulingCatalog;
use crate::error::{AppError, AppResult};

/// Crop service for lifecycle questions about caller-supplied crops
#[derive(Clone)]
pub struct CropService {
    catalog: Arc<SchedulingCatalog>,
}

/// Input for resolving a crop's stage
#[derive(Debug, Deserialize)]
pub struct ResolveStageInput {
    pub crop: Crop,
    /// Defaults to now
    pub evaluation_date: Option<DateTime<Utc>>,
}

/// Input for moving a crop into its next stage
#[derive(Debug, Deserialize)]
pub struct TransitionInput {
    pub crop: Crop,
    pub stage: Stage,
    /// Defaults to now
    pub at: Option<DateTime<Utc>>,
}

/// Everything a grower needs for the crop's current week
#[derive(Debug, Clone, Serialize)]
pub struct CropOverview {
    pub crop_id: uuid::Uuid,
    pub crop_name: String,
    pub stage_info: StageInfo,
    pub formula: Option<Formula>,
    pub parameters: Option<PnoParameterSet>,
}

impl CropService {
    /// Create a new CropService instance
    pub fn new(catalog: Arc<SchedulingCatalog>) -> Self {
        Self { catalog }
    }

    /// Resolve the stage the crop is in at the evaluation date
    pub fn resolve(&self, input: &ResolveStageInput) -> StageInfo {
        let info = match input.evaluation_date {
            Some(at) => resolve_stage(&input.crop, at),
            None => resolve_stage_now(&input.crop),
        };
        tracing::debug!(
            crop_id = %input.crop.id,
            stage = %info.stage,
            week = info.week_in_stage,
            "Resolved crop stage"
        );
        info
    }

    /// Record a transition and return the updated crop
    pub fn transition(&self, input: TransitionInput) -> AppResult<Crop> {
        validate_crop_name(&input.crop.name).map_err(|msg| {
            AppError::field("crop.name", msg, "El nombre del cultivo no es válido")
        })?;
        validate_transition_order(&input.crop).map_err(|msg| {
            AppError::field(
                "crop",
                msg,
                "Las fechas de cambio de etapa no siguen el ciclo de cultivo",
            )
        })?;

        let mut crop = input.crop;
        let at = input.at.unwrap_or_else(Utc::now);
        crop.record_transition(input.stage, at)?;

        tracing::info!(
            crop_id = %crop.id,
            stage = %input.stage,
            at = %at,
            "Crop moved to new stage"
        );
        Ok(crop)
    }

    /// Stage, scheduled formula and PNO targets for the crop's current week
    pub fn overview(&self, input: &ResolveStageInput) -> CropOverview {
        let stage_info = self.resolve(input);
        let formula = resolve_formula(
            stage_info.stage,
            stage_info.week_in_stage,
            &self.catalog.schedule,
            &self.catalog.formulas,
        )
        .cloned();
        let parameters = resolve_parameters_in(
            &self.catalog.pno_parameters,
            stage_info.stage,
            stage_info.week_in_stage,
        )
        .cloned();

        if formula.is_none() && !stage_info.stage.is_terminal() {
            tracing::debug!(
                stage = %stage_info.stage,
                week = stage_info.week_in_stage,
                "No formula scheduled"
            );
        }

        CropOverview {
            crop_id: input.crop.id,
            crop_name: input.crop.name.clone(),
            stage_info,
            formula,
            parameters,
        }
    }
}
