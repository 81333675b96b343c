//! Cultivation lifecycle stages

use serde::{Deserialize, Serialize};

use crate::types::Language;

/// One phase of the cultivation lifecycle.
///
/// Declaration order is the lifecycle order, so `Ord` compares how far a
/// crop has advanced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    Cloning,
    PreVegetation,
    Vegetation,
    Flowering,
    DryingCuring,
    Harvested,
}

impl Stage {
    /// Every stage in lifecycle order
    pub const ALL: [Stage; 6] = [
        Stage::Cloning,
        Stage::PreVegetation,
        Stage::Vegetation,
        Stage::Flowering,
        Stage::DryingCuring,
        Stage::Harvested,
    ];

    /// The stage that follows this one, `None` once harvested
    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::Cloning => Some(Stage::PreVegetation),
            Stage::PreVegetation => Some(Stage::Vegetation),
            Stage::Vegetation => Some(Stage::Flowering),
            Stage::Flowering => Some(Stage::DryingCuring),
            Stage::DryingCuring => Some(Stage::Harvested),
            Stage::Harvested => None,
        }
    }

    /// The stage that precedes this one, `None` for cloning
    pub fn previous(&self) -> Option<Stage> {
        match self {
            Stage::Cloning => None,
            Stage::PreVegetation => Some(Stage::Cloning),
            Stage::Vegetation => Some(Stage::PreVegetation),
            Stage::Flowering => Some(Stage::Vegetation),
            Stage::DryingCuring => Some(Stage::Flowering),
            Stage::Harvested => Some(Stage::DryingCuring),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Harvested)
    }

    /// Serialized name, e.g. `PRE_VEGETATION`
    pub fn code(&self) -> &'static str {
        match self {
            Stage::Cloning => "CLONING",
            Stage::PreVegetation => "PRE_VEGETATION",
            Stage::Vegetation => "VEGETATION",
            Stage::Flowering => "FLOWERING",
            Stage::DryingCuring => "DRYING_CURING",
            Stage::Harvested => "HARVESTED",
        }
    }

    /// Label shown to growers
    pub fn label(&self, language: Language) -> &'static str {
        match (self, language) {
            (Stage::Cloning, Language::Spanish) => "Esquejes",
            (Stage::Cloning, Language::English) => "Cloning",
            (Stage::PreVegetation, Language::Spanish) => "Prevegetación",
            (Stage::PreVegetation, Language::English) => "Pre-vegetation",
            (Stage::Vegetation, Language::Spanish) => "Vegetación",
            (Stage::Vegetation, Language::English) => "Vegetation",
            (Stage::Flowering, Language::Spanish) => "Floración",
            (Stage::Flowering, Language::English) => "Flowering",
            (Stage::DryingCuring, Language::Spanish) => "Secado y curado",
            (Stage::DryingCuring, Language::English) => "Drying & curing",
            (Stage::Harvested, Language::Spanish) => "Cosechado",
            (Stage::Harvested, Language::English) => "Harvested",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label(Language::English))
    }
}

impl std::str::FromStr for Stage {
    type Err = &'static str;

    /// Accepts the serialized names in any case, with `-` or `_` separators
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        Stage::ALL
            .into_iter()
            .find(|stage| stage.code() == normalized)
            .ok_or("Unknown cultivation stage")
    }
}
