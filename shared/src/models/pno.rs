//! PNO (standard operating procedure) environmental targets

use serde::{Deserialize, Serialize};

use super::WeeklySchedule;
use crate::types::DayPeriod;

/// Stage -> week -> parameter set
pub type PnoTable = WeeklySchedule<PnoParameterSet>;

/// Target for one measured parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTarget", into = "RawTarget")]
pub enum ParameterTarget {
    /// No constraint, whatever the room does
    Ambient,
    /// Single set point
    Value(f64),
    /// Inclusive band
    Range { min: f64, max: f64 },
}

impl ParameterTarget {
    pub fn range(min: f64, max: f64) -> Self {
        ParameterTarget::Range { min, max }
    }

    pub fn is_ambient(&self) -> bool {
        matches!(self, ParameterTarget::Ambient)
    }

    /// Midpoint of a range, the value itself for a set point
    pub fn midpoint(&self) -> Option<f64> {
        match self {
            ParameterTarget::Ambient => None,
            ParameterTarget::Value(v) => Some(*v),
            ParameterTarget::Range { min, max } => Some((min + max) / 2.0),
        }
    }
}

impl std::fmt::Display for ParameterTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterTarget::Ambient => write!(f, "ambient"),
            ParameterTarget::Value(v) => write!(f, "{}", v),
            ParameterTarget::Range { min, max } => write!(f, "{}-{}", min, max),
        }
    }
}

/// JSON form: `"ambient"`, a number, or `[min, max]`
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawTarget {
    Value(f64),
    Range([f64; 2]),
    Marker(AmbientMarker),
}

#[derive(Serialize, Deserialize)]
enum AmbientMarker {
    #[serde(rename = "ambient")]
    Ambient,
}

impl From<RawTarget> for ParameterTarget {
    fn from(raw: RawTarget) -> Self {
        match raw {
            RawTarget::Value(v) => ParameterTarget::Value(v),
            RawTarget::Range([min, max]) => ParameterTarget::Range { min, max },
            RawTarget::Marker(AmbientMarker::Ambient) => ParameterTarget::Ambient,
        }
    }
}

impl From<ParameterTarget> for RawTarget {
    fn from(target: ParameterTarget) -> Self {
        match target {
            ParameterTarget::Ambient => RawTarget::Marker(AmbientMarker::Ambient),
            ParameterTarget::Value(v) => RawTarget::Value(v),
            ParameterTarget::Range { min, max } => RawTarget::Range([min, max]),
        }
    }
}

/// Environmental and irrigation targets for one stage/week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PnoParameterSet {
    /// °C
    pub temperature_day: ParameterTarget,
    pub temperature_night: ParameterTarget,
    /// % relative humidity
    pub humidity_day: ParameterTarget,
    pub humidity_night: ParameterTarget,
    /// kPa
    pub vpd: ParameterTarget,
    /// ppm
    pub co2: ParameterTarget,
    /// µmol/m²/s
    pub ppfd: ParameterTarget,
    pub ph: ParameterTarget,
    pub target_ppm: ParameterTarget,
}

/// Parameters that can be measured against a [`PnoParameterSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    Temperature,
    Humidity,
    Vpd,
    Co2,
    Ppfd,
    Ph,
    Ppm,
}

impl ParameterKind {
    pub const ALL: [ParameterKind; 7] = [
        ParameterKind::Temperature,
        ParameterKind::Humidity,
        ParameterKind::Vpd,
        ParameterKind::Co2,
        ParameterKind::Ppfd,
        ParameterKind::Ph,
        ParameterKind::Ppm,
    ];

    pub fn unit(&self) -> &'static str {
        match self {
            ParameterKind::Temperature => "°C",
            ParameterKind::Humidity => "%",
            ParameterKind::Vpd => "kPa",
            ParameterKind::Co2 => "ppm",
            ParameterKind::Ppfd => "µmol/m²/s",
            ParameterKind::Ph => "pH",
            ParameterKind::Ppm => "ppm",
        }
    }
}

impl PnoParameterSet {
    /// Target for `kind`; temperature and humidity differ between day and night
    pub fn target(&self, kind: ParameterKind, period: DayPeriod) -> ParameterTarget {
        match (kind, period) {
            (ParameterKind::Temperature, DayPeriod::Day) => self.temperature_day,
            (ParameterKind::Temperature, DayPeriod::Night) => self.temperature_night,
            (ParameterKind::Humidity, DayPeriod::Day) => self.humidity_day,
            (ParameterKind::Humidity, DayPeriod::Night) => self.humidity_night,
            (ParameterKind::Vpd, _) => self.vpd,
            (ParameterKind::Co2, _) => self.co2,
            (ParameterKind::Ppfd, _) => self.ppfd,
            (ParameterKind::Ph, _) => self.ph,
            (ParameterKind::Ppm, _) => self.target_ppm,
        }
    }
}
