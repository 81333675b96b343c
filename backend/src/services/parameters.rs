//! PNO parameter service: target lookups and range checks

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::{
    classify, is_out_of_range, resolve_parameters_in, validate_tolerances, ParameterTarget,
    PnoParameterSet, RangeStatus, Stage, DEFAULT_OUT_OF_RANGE_TOLERANCE,
};

use super::formula::check_week;
use crate::catalog::SchedulingCatalog;
use crate::error::{AppError, AppResult};

/// Parameter service
#[derive(Clone)]
pub struct ParameterService {
    catalog: Arc<SchedulingCatalog>,
}

/// Input for the boolean range test
#[derive(Debug, Deserialize)]
pub struct RangeCheckInput {
    pub value: f64,
    pub target: ParameterTarget,
    pub tolerance: Option<f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RangeCheckResult {
    pub out_of_range: bool,
}

/// Input for tiered classification
#[derive(Debug, Deserialize)]
pub struct ClassifyInput {
    pub value: f64,
    pub target: ParameterTarget,
    pub warning_tolerance: f64,
    pub danger_tolerance: Option<f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClassifyResult {
    pub status: RangeStatus,
}

impl ParameterService {
    /// Create a new ParameterService instance
    pub fn new(catalog: Arc<SchedulingCatalog>) -> Self {
        Self { catalog }
    }

    /// Targets for a stage/week
    pub fn get(&self, stage: Stage, week: u32) -> AppResult<PnoParameterSet> {
        check_week("week", week)?;
        resolve_parameters_in(&self.catalog.pno_parameters, stage, week)
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(format!("PNO parameters for {} week {}", stage, week))
            })
    }

    /// Boolean out-of-range test
    pub fn check(&self, input: &RangeCheckInput) -> AppResult<RangeCheckResult> {
        let tolerance = input.tolerance.unwrap_or(DEFAULT_OUT_OF_RANGE_TOLERANCE);
        validate_tolerances(tolerance, None).map_err(|msg| {
            AppError::field("tolerance", msg, "La tolerancia no es válida")
        })?;
        Ok(RangeCheckResult {
            out_of_range: is_out_of_range(input.value, &input.target, tolerance),
        })
    }

    /// Tiered in_range / warning / danger classification
    pub fn classify(&self, input: &ClassifyInput) -> AppResult<ClassifyResult> {
        validate_tolerances(input.warning_tolerance, None).map_err(|msg| {
            AppError::field("warning_tolerance", msg, "La tolerancia de aviso no es válida")
        })?;
        validate_tolerances(input.warning_tolerance, input.danger_tolerance).map_err(|msg| {
            AppError::field("danger_tolerance", msg, "La tolerancia de peligro no es válida")
        })?;
        Ok(ClassifyResult {
            status: classify(
                input.value,
                &input.target,
                input.warning_tolerance,
                input.danger_tolerance,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ParameterService {
        ParameterService::new(Arc::new(SchedulingCatalog::builtin()))
    }

    #[test]
    fn test_get_parameters() {
        let params = service().get(Stage::Cloning, 1).unwrap();
        assert_eq!(params.co2, ParameterTarget::Ambient);
        assert!(matches!(
            service().get(Stage::Harvested, 1),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_check_uses_default_tolerance() {
        let result = service()
            .check(&RangeCheckInput {
                value: 80.0,
                target: ParameterTarget::Value(100.0),
                tolerance: None,
            })
            .unwrap();
        assert!(result.out_of_range);
    }

    #[test]
    fn test_classify_rejects_negative_tolerance() {
        let result = service().classify(&ClassifyInput {
            value: 1.0,
            target: ParameterTarget::Value(1.0),
            warning_tolerance: -1.0,
            danger_tolerance: None,
        });
        assert!(matches!(
            result,
            Err(AppError::Validation { ref field, .. }) if field == "warning_tolerance"
        ));
    }

    #[test]
    fn test_classify_names_danger_tolerance() {
        let result = service().classify(&ClassifyInput {
            value: 1.0,
            target: ParameterTarget::Value(1.0),
            warning_tolerance: 5.0,
            danger_tolerance: Some(2.0),
        });
        assert!(matches!(
            result,
            Err(AppError::Validation { ref field, .. }) if field == "danger_tolerance"
        ));
    }

    #[test]
    fn test_classify_range() {
        let result = service()
            .classify(&ClassifyInput {
                value: 58.0,
                target: ParameterTarget::range(60.0, 70.0),
                warning_tolerance: 2.0,
                danger_tolerance: Some(5.0),
            })
            .unwrap();
        assert_eq!(result.status, RangeStatus::Warning);
    }
}
