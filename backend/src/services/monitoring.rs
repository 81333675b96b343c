//! Monitoring service: checks room readings against the crop's current targets

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{
    evaluate_reading, overall_status, resolve_parameters_in, resolve_stage, Crop,
    EnvironmentReading, ParameterDeviation, RangeStatus, StageInfo, ToleranceProfile,
};

use crate::catalog::SchedulingCatalog;

/// Monitoring service
#[derive(Clone)]
pub struct MonitoringService {
    catalog: Arc<SchedulingCatalog>,
    tolerances: ToleranceProfile,
}

/// Input for evaluating a reading
#[derive(Debug, Deserialize)]
pub struct EvaluateReadingInput {
    pub crop: Crop,
    pub reading: EnvironmentReading,
    /// Defaults to now
    pub evaluation_date: Option<DateTime<Utc>>,
}

/// Outcome of a reading evaluation
#[derive(Debug, Clone, Serialize)]
pub struct MonitoringReport {
    pub stage_info: StageInfo,
    /// False when the stage/week has no PNO targets
    pub targets_available: bool,
    pub deviations: Vec<ParameterDeviation>,
    pub status: RangeStatus,
}

impl MonitoringService {
    /// Create a new MonitoringService instance
    pub fn new(catalog: Arc<SchedulingCatalog>, tolerances: ToleranceProfile) -> Self {
        Self {
            catalog,
            tolerances,
        }
    }

    /// Classify a reading against the targets of the crop's current week
    pub fn evaluate(&self, input: &EvaluateReadingInput) -> MonitoringReport {
        let at = input.evaluation_date.unwrap_or_else(Utc::now);
        let stage_info = resolve_stage(&input.crop, at);
        let parameters = resolve_parameters_in(
            &self.catalog.pno_parameters,
            stage_info.stage,
            stage_info.week_in_stage,
        );

        let deviations = match parameters {
            Some(parameters) => evaluate_reading(&input.reading, parameters, &self.tolerances),
            None => Vec::new(),
        };
        let status = overall_status(&deviations);

        for deviation in &deviations {
            tracing::warn!(
                crop_id = %input.crop.id,
                parameter = ?deviation.parameter,
                value = deviation.value,
                target = %deviation.target,
                status = %deviation.status,
                "Reading outside PNO target"
            );
        }

        MonitoringReport {
            stage_info,
            targets_available: parameters.is_some(),
            deviations,
            status,
        }
    }
}
