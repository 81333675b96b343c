//! Evaluation of room readings against PNO targets

use serde::{Deserialize, Serialize};

use crate::models::{ParameterKind, ParameterTarget, PnoParameterSet};
use crate::ranges::{classify, RangeStatus};
use crate::types::DayPeriod;

/// A set of measurements taken in a grow room
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnvironmentReading {
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub vpd: Option<f64>,
    #[serde(default)]
    pub co2: Option<f64>,
    #[serde(default)]
    pub ppfd: Option<f64>,
    #[serde(default)]
    pub ph: Option<f64>,
    #[serde(default)]
    pub ppm: Option<f64>,
    #[serde(default = "default_daytime")]
    pub is_daytime: bool,
}

fn default_daytime() -> bool {
    true
}

impl Default for EnvironmentReading {
    fn default() -> Self {
        Self {
            temperature: None,
            humidity: None,
            vpd: None,
            co2: None,
            ppfd: None,
            ph: None,
            ppm: None,
            is_daytime: true,
        }
    }
}

impl EnvironmentReading {
    pub fn value(&self, kind: ParameterKind) -> Option<f64> {
        match kind {
            ParameterKind::Temperature => self.temperature,
            ParameterKind::Humidity => self.humidity,
            ParameterKind::Vpd => self.vpd,
            ParameterKind::Co2 => self.co2,
            ParameterKind::Ppfd => self.ppfd,
            ParameterKind::Ph => self.ph,
            ParameterKind::Ppm => self.ppm,
        }
    }
}

/// Warning and danger tolerance for one parameter. Absolute units for range
/// targets, percent for set points.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Tolerance {
    pub warning: f64,
    #[serde(default)]
    pub danger: Option<f64>,
}

impl Tolerance {
    pub const fn new(warning: f64, danger: f64) -> Self {
        Self {
            warning,
            danger: Some(danger),
        }
    }
}

/// Tolerances used when evaluating readings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToleranceProfile {
    pub temperature: Tolerance,
    pub humidity: Tolerance,
    pub vpd: Tolerance,
    pub co2: Tolerance,
    pub ppfd: Tolerance,
    pub ph: Tolerance,
    pub ppm: Tolerance,
}

impl Default for ToleranceProfile {
    fn default() -> Self {
        Self {
            temperature: Tolerance::new(1.0, 3.0),
            humidity: Tolerance::new(5.0, 10.0),
            vpd: Tolerance::new(0.1, 0.3),
            co2: Tolerance::new(10.0, 25.0),
            ppfd: Tolerance::new(50.0, 150.0),
            ph: Tolerance::new(0.2, 0.5),
            ppm: Tolerance::new(10.0, 20.0),
        }
    }
}

impl ToleranceProfile {
    pub fn for_kind(&self, kind: ParameterKind) -> Tolerance {
        match kind {
            ParameterKind::Temperature => self.temperature,
            ParameterKind::Humidity => self.humidity,
            ParameterKind::Vpd => self.vpd,
            ParameterKind::Co2 => self.co2,
            ParameterKind::Ppfd => self.ppfd,
            ParameterKind::Ph => self.ph,
            ParameterKind::Ppm => self.ppm,
        }
    }
}

/// A measured value that is not within its target
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParameterDeviation {
    pub parameter: ParameterKind,
    pub value: f64,
    pub target: ParameterTarget,
    pub status: RangeStatus,
}

/// Classify each measured value against the day or night target and return
/// the ones that are not in range. Missing measurements are skipped.
pub fn evaluate_reading(
    reading: &EnvironmentReading,
    parameters: &PnoParameterSet,
    profile: &ToleranceProfile,
) -> Vec<ParameterDeviation> {
    let period = DayPeriod::from_daytime(reading.is_daytime);

    ParameterKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let value = reading.value(kind)?;
            let target = parameters.target(kind, period);
            let tolerance = profile.for_kind(kind);
            let status = classify(value, &target, tolerance.warning, tolerance.danger);
            (status != RangeStatus::InRange).then_some(ParameterDeviation {
                parameter: kind,
                value,
                target,
                status,
            })
        })
        .collect()
}

/// Worst status among `deviations`
pub fn overall_status(deviations: &[ParameterDeviation]) -> RangeStatus {
    deviations
        .iter()
        .map(|d| d.status)
        .max()
        .unwrap_or(RangeStatus::InRange)
}
