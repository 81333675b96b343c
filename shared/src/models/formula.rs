//! Nutrient formula models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Stage, WeeklySchedule};

/// Stage -> week -> formula id
pub type FormulaSchedule = WeeklySchedule<String>;

/// A nutrient solution recipe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Formula {
    pub id: String,
    pub name: String,
    pub stage: Stage,
    pub nutrients: Vec<NutrientDose>,
    #[serde(default)]
    pub target_ppm: Option<u32>,
    #[serde(default)]
    pub target_ph: Option<Decimal>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// One product in a formula
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutrientDose {
    pub product: String,
    pub ml_per_liter: Decimal,
}

/// Amount of one product to add to a tank
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TankMixLine {
    pub product: String,
    pub millilitres: Decimal,
}

impl Formula {
    /// Total product volume per litre of water
    pub fn total_ml_per_liter(&self) -> Decimal {
        self.nutrients.iter().map(|n| n.ml_per_liter).sum()
    }

    /// Product amounts for a tank of `liters`. Non-positive volumes yield
    /// zero amounts.
    pub fn tank_mix(&self, liters: Decimal) -> Vec<TankMixLine> {
        let liters = liters.max(Decimal::ZERO);
        self.nutrients
            .iter()
            .map(|n| TankMixLine {
                product: n.product.clone(),
                millilitres: n.ml_per_liter * liters,
            })
            .collect()
    }

    /// Plain-water flush formulas carry no nutrients
    pub fn is_flush(&self) -> bool {
        self.nutrients.iter().all(|n| n.ml_per_liter.is_zero())
    }
}

/// Available formulas, searched by id
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct FormulaCatalog {
    formulas: Vec<Formula>,
}

impl FormulaCatalog {
    pub fn new(formulas: Vec<Formula>) -> Self {
        Self { formulas }
    }

    pub fn find(&self, id: &str) -> Option<&Formula> {
        self.formulas.iter().find(|f| f.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Formula> {
        self.formulas.iter()
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }
}

impl From<Vec<Formula>> for FormulaCatalog {
    fn from(formulas: Vec<Formula>) -> Self {
        Self::new(formulas)
    }
}
