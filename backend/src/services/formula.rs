//! Formula service for catalog access and weekly schedule lookups

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{
    resolve_formula, validate_tank_volume, validate_week, weekly_plan, Formula, Stage,
    TankMixLine, WeeklyPlanEntry,
};

use crate::catalog::SchedulingCatalog;
use crate::error::{AppError, AppResult};

/// Formula service
#[derive(Clone)]
pub struct FormulaService {
    catalog: Arc<SchedulingCatalog>,
}

/// Query for the formula of one stage/week
#[derive(Debug, Deserialize)]
pub struct FormulaQuery {
    pub stage: Stage,
    pub week: u32,
}

/// Resolved formula; `formula` is null when nothing is scheduled
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedFormula {
    pub stage: Stage,
    pub week: u32,
    pub formula: Option<Formula>,
}

/// Query for a range of weeks
#[derive(Debug, Deserialize)]
pub struct PlanQuery {
    pub from_week: Option<u32>,
    pub to_week: Option<u32>,
}

/// Query for a tank mix
#[derive(Debug, Deserialize)]
pub struct TankMixQuery {
    pub liters: Decimal,
}

/// Product amounts for one tank
#[derive(Debug, Clone, Serialize)]
pub struct TankMix {
    pub formula_id: String,
    pub liters: Decimal,
    pub lines: Vec<TankMixLine>,
    pub total_ml: Decimal,
}

/// Week must be 1-52
pub(crate) fn check_week(field: &str, week: u32) -> AppResult<()> {
    validate_week(week)
        .map_err(|msg| AppError::field(field, msg, "La semana debe estar entre 1 y 52"))
}

impl FormulaService {
    /// Create a new FormulaService instance
    pub fn new(catalog: Arc<SchedulingCatalog>) -> Self {
        Self { catalog }
    }

    /// All formulas in the catalog
    pub fn list(&self) -> Vec<Formula> {
        self.catalog.formulas.iter().cloned().collect()
    }

    /// Get a formula by id
    pub fn get(&self, formula_id: &str) -> AppResult<Formula> {
        self.catalog
            .formulas
            .find(formula_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Formula {}", formula_id)))
    }

    /// Amount of each product for a tank of the given volume
    pub fn tank_mix(&self, formula_id: &str, query: &TankMixQuery) -> AppResult<TankMix> {
        validate_tank_volume(query.liters).map_err(|msg| {
            AppError::field("liters", msg, "El volumen del tanque debe ser mayor que 0")
        })?;
        let formula = self.get(formula_id)?;
        let lines = formula.tank_mix(query.liters);

        Ok(TankMix {
            formula_id: formula.id.clone(),
            liters: query.liters,
            total_ml: formula.total_ml_per_liter() * query.liters,
            lines,
        })
    }

    /// Formula scheduled for a stage/week
    pub fn resolve(&self, query: &FormulaQuery) -> AppResult<ResolvedFormula> {
        check_week("week", query.week)?;

        let formula = resolve_formula(
            query.stage,
            query.week,
            &self.catalog.schedule,
            &self.catalog.formulas,
        )
        .cloned();
        tracing::debug!(
            stage = %query.stage,
            week = query.week,
            formula = formula.as_ref().map(|f| f.id.as_str()).unwrap_or("none"),
            "Resolved formula"
        );

        Ok(ResolvedFormula {
            stage: query.stage,
            week: query.week,
            formula,
        })
    }

    /// Week by week formula and targets for a stage. Defaults to every
    /// scheduled week of the stage.
    pub fn plan(&self, stage: Stage, query: &PlanQuery) -> AppResult<Vec<WeeklyPlanEntry>> {
        let from_week = query.from_week.unwrap_or(1);
        let last_defined = self
            .catalog
            .schedule
            .last_week(stage)
            .max(self.catalog.pno_parameters.last_week(stage))
            .unwrap_or(1);
        let to_week = query.to_week.unwrap_or(last_defined);

        check_week("from_week", from_week)?;
        check_week("to_week", to_week)?;
        if to_week < from_week {
            return Err(AppError::field(
                "to_week",
                "to_week must not be before from_week",
                "La semana final no puede ser anterior a la inicial",
            ));
        }

        Ok(weekly_plan(
            stage,
            from_week,
            to_week,
            &self.catalog.schedule,
            &self.catalog.formulas,
            &self.catalog.pno_parameters,
        ))
    }
}
