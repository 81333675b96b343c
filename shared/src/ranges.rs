//! Classification of measured values against PNO targets
//!
//! Tolerance units depend on the target shape. Set points use relative
//! tolerances (a fraction in [`is_out_of_range`], a percentage in
//! [`classify`]); ranges use absolute tolerances in the parameter's own unit.

use serde::{Deserialize, Serialize};

use crate::models::ParameterTarget;

/// Default tolerance for [`is_out_of_range`]: 10% of a set point, or 0.1
/// units around a range
pub const DEFAULT_OUT_OF_RANGE_TOLERANCE: f64 = 0.1;

/// Result of [`classify`], ordered by severity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum RangeStatus {
    #[default]
    InRange,
    Warning,
    Danger,
}

impl std::fmt::Display for RangeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeStatus::InRange => write!(f, "in_range"),
            RangeStatus::Warning => write!(f, "warning"),
            RangeStatus::Danger => write!(f, "danger"),
        }
    }
}

/// Bounds of `set_point` widened by a relative `fraction`, lowest first
fn set_point_band(set_point: f64, fraction: f64) -> (f64, f64) {
    let a = set_point * (1.0 - fraction);
    let b = set_point * (1.0 + fraction);
    (a.min(b), a.max(b))
}

/// Whether `value` falls outside `target` widened by `tolerance`.
///
/// Ambient targets and non-finite values are never out of range.
pub fn is_out_of_range(value: f64, target: &ParameterTarget, tolerance: f64) -> bool {
    if !value.is_finite() {
        return false;
    }
    match *target {
        ParameterTarget::Ambient => false,
        ParameterTarget::Value(set_point) => {
            let (low, high) = set_point_band(set_point, tolerance);
            value < low || value > high
        }
        ParameterTarget::Range { min, max } => value < min - tolerance || value > max + tolerance,
    }
}

/// Tiered classification of `value` against `target`.
///
/// `danger_tolerance` defaults to `warning_tolerance`. For a range target
/// any value outside `[min, max]` is at least a warning, even with zero
/// tolerance. Band edges are inclusive.
pub fn classify(
    value: f64,
    target: &ParameterTarget,
    warning_tolerance: f64,
    danger_tolerance: Option<f64>,
) -> RangeStatus {
    if !value.is_finite() {
        return RangeStatus::InRange;
    }
    let danger_tolerance = danger_tolerance.unwrap_or(warning_tolerance);

    match *target {
        ParameterTarget::Ambient => RangeStatus::InRange,
        ParameterTarget::Value(set_point) => {
            let outside = |percent: f64| {
                let (low, high) = set_point_band(set_point, percent / 100.0);
                value < low || value > high
            };
            if outside(danger_tolerance) {
                RangeStatus::Danger
            } else if outside(warning_tolerance) {
                RangeStatus::Warning
            } else {
                RangeStatus::InRange
            }
        }
        ParameterTarget::Range { min, max } => {
            let outside = |margin: f64| value < min - margin || value > max + margin;
            if outside(danger_tolerance) {
                RangeStatus::Danger
            } else if outside(warning_tolerance) || outside(0.0) {
                RangeStatus::Warning
            } else {
                RangeStatus::InRange
            }
        }
    }
}
