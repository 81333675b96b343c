//! Crop models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::Stage;

/// A crop (batch of plants) and the dates it entered each stage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Crop {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub strain: Option<String>,
    pub cloning_date: DateTime<Utc>,
    #[serde(default)]
    pub pre_vegetation_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub vegetation_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub flowering_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub drying_curing_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub harvest_date: Option<DateTime<Utc>>,
}

/// Errors raised when recording a stage transition
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Crop is already harvested")]
    AlreadyHarvested,

    #[error("Cannot move from {current} to {requested}")]
    NotNextStage { current: Stage, requested: Stage },

    #[error("Transition to {stage} is dated before the previous transition")]
    DateBeforePreviousTransition { stage: Stage },
}

impl Crop {
    /// Create a crop that was cloned at `cloning_date`
    pub fn new(name: impl Into<String>, cloning_date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            strain: None,
            cloning_date,
            pre_vegetation_date: None,
            vegetation_date: None,
            flowering_date: None,
            drying_curing_date: None,
            harvest_date: None,
        }
    }

    /// Date the crop entered `stage`, if recorded
    pub fn transition_date(&self, stage: Stage) -> Option<DateTime<Utc>> {
        match stage {
            Stage::Cloning => Some(self.cloning_date),
            Stage::PreVegetation => self.pre_vegetation_date,
            Stage::Vegetation => self.vegetation_date,
            Stage::Flowering => self.flowering_date,
            Stage::DryingCuring => self.drying_curing_date,
            Stage::Harvested => self.harvest_date,
        }
    }

    /// Most advanced stage with a recorded date, ignoring the calendar
    pub fn current_recorded_stage(&self) -> Stage {
        Stage::ALL
            .into_iter()
            .rev()
            .find(|stage| self.transition_date(*stage).is_some())
            .unwrap_or(Stage::Cloning)
    }

    /// Advance the crop into `stage` at `at`.
    ///
    /// Only the stage directly after the current recorded one is accepted, and
    /// `at` may not precede the date of the current stage.
    pub fn record_transition(
        &mut self,
        stage: Stage,
        at: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        let current = self.current_recorded_stage();
        if current.is_terminal() {
            return Err(TransitionError::AlreadyHarvested);
        }
        if current.next() != Some(stage) {
            return Err(TransitionError::NotNextStage {
                current,
                requested: stage,
            });
        }
        if let Some(previous) = self.transition_date(current) {
            if at < previous {
                return Err(TransitionError::DateBeforePreviousTransition { stage });
            }
        }

        let slot = match stage {
            Stage::PreVegetation => &mut self.pre_vegetation_date,
            Stage::Vegetation => &mut self.vegetation_date,
            Stage::Flowering => &mut self.flowering_date,
            Stage::DryingCuring => &mut self.drying_curing_date,
            Stage::Harvested => &mut self.harvest_date,
            Stage::Cloning => {
                return Err(TransitionError::NotNextStage {
                    current,
                    requested: stage,
                })
            }
        };
        *slot = Some(at);
        Ok(())
    }
}

/// Where a crop stands in its lifecycle at a given date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StageInfo {
    pub stage: Stage,
    pub stage_start_date: DateTime<Utc>,
    pub days_in_stage: i64,
    /// 1-based
    pub week_in_stage: u32,
    /// 1-based, 1 to 7
    pub day_of_week_in_stage: u32,
    pub total_days: i64,
    pub total_week: u32,
    pub total_day_of_week: u32,
    pub can_transition: bool,
    pub next_stage: Option<Stage>,
}
