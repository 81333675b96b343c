//! HTTP handlers for formula endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use shared::{Formula, Stage, WeeklyPlanEntry};

use crate::error::AppResult;
use crate::services::formula::{
    FormulaQuery, FormulaService, PlanQuery, ResolvedFormula, TankMix, TankMixQuery,
};
use crate::AppState;

/// List every formula in the catalog
pub async fn list_formulas(State(state): State<AppState>) -> Json<Vec<Formula>> {
    let service = FormulaService::new(state.catalog);
    Json(service.list())
}

/// Get a formula by ID
pub async fn get_formula(
    State(state): State<AppState>,
    Path(formula_id): Path<String>,
) -> AppResult<Json<Formula>> {
    let service = FormulaService::new(state.catalog);
    let formula = service.get(&formula_id)?;
    Ok(Json(formula))
}

/// Product amounts for a tank of the given volume
pub async fn get_tank_mix(
    State(state): State<AppState>,
    Path(formula_id): Path<String>,
    Query(query): Query<TankMixQuery>,
) -> AppResult<Json<TankMix>> {
    let service = FormulaService::new(state.catalog);
    let mix = service.tank_mix(&formula_id, &query)?;
    Ok(Json(mix))
}

/// Formula scheduled for a stage and week
pub async fn resolve_formula(
    State(state): State<AppState>,
    Query(query): Query<FormulaQuery>,
) -> AppResult<Json<ResolvedFormula>> {
    let service = FormulaService::new(state.catalog);
    let resolved = service.resolve(&query)?;
    Ok(Json(resolved))
}

/// Week by week plan for a stage
pub async fn get_stage_schedule(
    State(state): State<AppState>,
    Path(stage): Path<Stage>,
    Query(query): Query<PlanQuery>,
) -> AppResult<Json<Vec<WeeklyPlanEntry>>> {
    let service = FormulaService::new(state.catalog);
    let plan = service.plan(stage, &query)?;
    Ok(Json(plan))
}
