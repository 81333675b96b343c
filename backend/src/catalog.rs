//! Reference data the scheduling services read from
//!
//! The built-in catalog from the shared crate is used unless `catalog.path`
//! points at a JSON file with the same shape.

use serde::{Deserialize, Serialize};
use shared::catalog::{formula_catalog, formula_schedule, pno_table};
use shared::{validate_formula_id, validate_schedule, FormulaCatalog, FormulaSchedule, PnoTable};

use crate::config::CatalogConfig;
use crate::error::{AppError, AppResult};

/// Formulas, their weekly schedule and the PNO targets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingCatalog {
    pub formulas: FormulaCatalog,
    pub schedule: FormulaSchedule,
    pub pno_parameters: PnoTable,
}

impl SchedulingCatalog {
    /// Reference data shipped with the platform
    pub fn builtin() -> Self {
        Self {
            formulas: formula_catalog(),
            schedule: formula_schedule(),
            pno_parameters: pno_table(),
        }
    }

    /// Parse and validate a catalog document
    pub fn from_json(json: &str) -> AppResult<Self> {
        let catalog: SchedulingCatalog =
            serde_json::from_str(json).map_err(|e| AppError::CatalogLoad(e.to_string()))?;
        for formula in catalog.formulas.iter() {
            validate_formula_id(&formula.id)
                .map_err(|msg| AppError::CatalogLoad(format!("{}: {}", formula.id, msg)))?;
        }
        validate_schedule(&catalog.schedule, &catalog.formulas)
            .map_err(|msg| AppError::CatalogLoad(msg.to_string()))?;
        Ok(catalog)
    }

    /// Load the configured catalog, falling back to the built-in one
    pub fn load(config: &CatalogConfig) -> AppResult<Self> {
        let Some(path) = config.path.as_deref() else {
            tracing::info!("Using built-in formula catalog");
            return Ok(Self::builtin());
        };

        tracing::info!("Loading formula catalog from {}", path);
        let json = std::fs::read_to_string(path)
            .map_err(|e| AppError::CatalogLoad(format!("{}: {}", path, e)))?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(
            formulas = catalog.formulas.len(),
            stages = catalog.schedule.stages().count(),
            "Formula catalog loaded"
        );
        Ok(catalog)
    }
}
