//! Crop stage resolution and stage/week lookups
//!
//! Everything here is a pure function of its inputs: crop records, lookup
//! tables and an evaluation date supplied by the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::default_pno_table;
use crate::models::{
    Crop, Formula, FormulaCatalog, FormulaSchedule, PnoParameterSet, PnoTable, Stage, StageInfo,
};

/// Determine the stage a crop is in at `evaluation_date`.
///
/// Checkpoints are examined from the most advanced stage back to
/// pre-vegetation; the first recorded date not after `evaluation_date` wins,
/// otherwise the crop is cloning since its cloning date. Day counts are
/// clamped at zero so future-dated transitions never go negative. Transition
/// dates are trusted as given.
pub fn resolve_stage(crop: &Crop, evaluation_date: DateTime<Utc>) -> StageInfo {
    let (stage, stage_start_date) = Stage::ALL
        .into_iter()
        .rev()
        .filter(|stage| *stage != Stage::Cloning)
        .find_map(|stage| {
            crop.transition_date(stage)
                .filter(|date| *date <= evaluation_date)
                .map(|date| (stage, date))
        })
        .unwrap_or((Stage::Cloning, crop.cloning_date));

    let days_in_stage = elapsed_days(stage_start_date, evaluation_date);
    let (week_in_stage, day_of_week_in_stage) = week_position(days_in_stage);
    let total_days = elapsed_days(crop.cloning_date, evaluation_date);
    let (total_week, total_day_of_week) = week_position(total_days);

    StageInfo {
        stage,
        stage_start_date,
        days_in_stage,
        week_in_stage,
        day_of_week_in_stage,
        total_days,
        total_week,
        total_day_of_week,
        can_transition: !stage.is_terminal(),
        next_stage: stage.next(),
    }
}

/// [`resolve_stage`] at the current instant
pub fn resolve_stage_now(crop: &Crop) -> StageInfo {
    resolve_stage(crop, Utc::now())
}

/// Whole days from `from` to `to`, never negative
fn elapsed_days(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_days().max(0)
}

/// 1-based (week, day of week) for a non-negative day count
fn week_position(days: i64) -> (u32, u32) {
    let days = days.max(0);
    ((days / 7) as u32 + 1, (days % 7) as u32 + 1)
}

/// Formula id scheduled for `stage`/`week`
pub fn resolve_formula_id<'a>(
    stage: Stage,
    week: u32,
    schedule: &'a FormulaSchedule,
) -> Option<&'a str> {
    schedule.lookup(stage, week).map(String::as_str)
}

/// Formula scheduled for `stage`/`week`, resolved against `catalog`.
///
/// `None` when nothing is scheduled (unknown stage, or a week inside a gap)
/// or when the scheduled id is not in the catalog.
pub fn resolve_formula<'a>(
    stage: Stage,
    week: u32,
    schedule: &FormulaSchedule,
    catalog: &'a FormulaCatalog,
) -> Option<&'a Formula> {
    resolve_formula_id(stage, week, schedule).and_then(|id| catalog.find(id))
}

/// PNO targets for `stage`/`week` from the built-in table
pub fn resolve_parameters(stage: Stage, week: u32) -> Option<&'static PnoParameterSet> {
    resolve_parameters_in(default_pno_table(), stage, week)
}

/// PNO targets for `stage`/`week` from `table`
pub fn resolve_parameters_in(
    table: &PnoTable,
    stage: Stage,
    week: u32,
) -> Option<&PnoParameterSet> {
    table.lookup(stage, week)
}

/// What a crop should receive in a given week
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklyPlanEntry {
    pub week: u32,
    pub formula: Option<Formula>,
    pub parameters: Option<PnoParameterSet>,
}

/// Formula and targets for each week of `stage` from `from_week` to `to_week`
/// inclusive. An inverted range yields an empty plan.
pub fn weekly_plan(
    stage: Stage,
    from_week: u32,
    to_week: u32,
    schedule: &FormulaSchedule,
    catalog: &FormulaCatalog,
    table: &PnoTable,
) -> Vec<WeeklyPlanEntry> {
    (from_week.max(1)..=to_week)
        .map(|week| WeeklyPlanEntry {
            week,
            formula: resolve_formula(stage, week, schedule, catalog).cloned(),
            parameters: resolve_parameters_in(table, stage, week).cloned(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{default_formula_catalog, default_formula_schedule};
    use crate::models::ParameterTarget;
    use chrono::{Duration, TimeZone};

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 1, 9, 30, 0).unwrap() + Duration::days(n)
    }

    fn flowering_crop() -> Crop {
        let mut crop = Crop::new("Batch 12", day(0));
        crop.pre_vegetation_date = Some(day(14));
        crop.vegetation_date = Some(day(28));
        crop.flowering_date = Some(day(56));
        crop
    }

    #[test]
    fn test_cloning_only_crop() {
        let crop = Crop::new("Batch 1", day(0));
        let info = resolve_stage(&crop, day(10));
        assert_eq!(info.stage, Stage::Cloning);
        assert_eq!(info.stage_start_date, day(0));
        assert_eq!(info.days_in_stage, 10);
        assert_eq!(info.total_days, 10);
        assert_eq!(info.week_in_stage, 2);
        assert_eq!(info.day_of_week_in_stage, 4);
        assert!(info.can_transition);
        assert_eq!(info.next_stage, Some(Stage::PreVegetation));
    }

    #[test]
    fn test_flowering_position() {
        let info = resolve_stage(&flowering_crop(), day(56 + 16));
        assert_eq!(info.stage, Stage::Flowering);
        assert_eq!(info.days_in_stage, 16);
        assert_eq!(info.week_in_stage, 3);
        assert_eq!(info.day_of_week_in_stage, 3);
        assert_eq!(info.total_days, 72);
        assert_eq!(info.total_week, 11);
        assert_eq!(info.total_day_of_week, 3);
    }

    #[test]
    fn test_future_transition_is_ignored() {
        // flowering is planned but not reached yet
        let info = resolve_stage(&flowering_crop(), day(40));
        assert_eq!(info.stage, Stage::Vegetation);
        assert_eq!(info.days_in_stage, 12);
    }

    #[test]
    fn test_transition_on_evaluation_instant_counts() {
        let info = resolve_stage(&flowering_crop(), day(56));
        assert_eq!(info.stage, Stage::Flowering);
        assert_eq!(info.days_in_stage, 0);
        assert_eq!(info.week_in_stage, 1);
        assert_eq!(info.day_of_week_in_stage, 1);
    }

    #[test]
    fn test_partial_days_round_down() {
        let info = resolve_stage(&flowering_crop(), day(58) + Duration::hours(23));
        assert_eq!(info.days_in_stage, 2);
    }

    #[test]
    fn test_harvested_is_terminal() {
        let mut crop = flowering_crop();
        crop.drying_curing_date = Some(day(119));
        crop.harvest_date = Some(day(133));
        let info = resolve_stage(&crop, day(140));
        assert_eq!(info.stage, Stage::Harvested);
        assert!(!info.can_transition);
        assert_eq!(info.next_stage, None);
        assert_eq!(info.days_in_stage, 7);
    }

    #[test]
    fn test_before_cloning_clamps_to_zero() {
        let crop = Crop::new("Planned", day(30));
        let info = resolve_stage(&crop, day(0));
        assert_eq!(info.stage, Stage::Cloning);
        assert_eq!(info.days_in_stage, 0);
        assert_eq!(info.total_days, 0);
        assert_eq!(info.week_in_stage, 1);
        assert_eq!(info.total_day_of_week, 1);
    }

    #[test]
    fn test_out_of_order_dates_pick_most_advanced() {
        let mut crop = Crop::new("Messy", day(0));
        crop.flowering_date = Some(day(5));
        crop.vegetation_date = Some(day(20));
        let info = resolve_stage(&crop, day(25));
        assert_eq!(info.stage, Stage::Flowering);
        assert_eq!(info.days_in_stage, 20);
    }

    #[test]
    fn test_flowering_formulas() {
        let schedule = default_formula_schedule();
        let catalog = default_formula_catalog();
        let id = |week| {
            resolve_formula(Stage::Flowering, week, schedule, catalog).map(|f| f.id.as_str())
        };

        assert_eq!(id(1), Some("pno-floracion-s1-2"));
        assert_eq!(id(3), Some("pno-floracion-s3-6"));
        assert_eq!(id(6), Some("pno-floracion-s3-6"));
        assert_eq!(id(8), Some("pno-floracion-s7-8"));
        assert_eq!(id(9), Some("pno-lavado-s9"));
        assert_eq!(id(15), Some("pno-lavado-s9"));
    }

    #[test]
    fn test_formula_missing_cases() {
        let catalog = default_formula_catalog();
        let schedule = default_formula_schedule();
        assert!(resolve_formula(Stage::Harvested, 1, schedule, catalog).is_none());
        assert!(resolve_formula(Stage::DryingCuring, 1, schedule, catalog).is_none());

        let mut sparse = FormulaSchedule::new();
        sparse.insert(Stage::Vegetation, 3, "pno-vegetacion-s3-4".to_string());
        assert!(resolve_formula(Stage::Vegetation, 1, &sparse, catalog).is_none());
        assert!(resolve_formula(Stage::Vegetation, 5, &sparse, catalog).is_some());

        sparse.insert(Stage::Vegetation, 4, "retired-formula".to_string());
        assert_eq!(resolve_formula_id(Stage::Vegetation, 4, &sparse), Some("retired-formula"));
        assert!(resolve_formula(Stage::Vegetation, 4, &sparse, catalog).is_none());
    }

    #[test]
    fn test_resolve_parameters() {
        let week1 = resolve_parameters(Stage::Flowering, 1).unwrap();
        assert_eq!(week1.target_ppm, ParameterTarget::Value(1100.0));

        let late = resolve_parameters(Stage::Flowering, 20).unwrap();
        assert_eq!(late, resolve_parameters(Stage::Flowering, 9).unwrap());

        assert!(resolve_parameters(Stage::Harvested, 1).is_none());
        assert!(resolve_parameters(Stage::Cloning, 0).is_none());
    }

    #[test]
    fn test_weekly_plan() {
        let plan = weekly_plan(
            Stage::Vegetation,
            1,
            5,
            default_formula_schedule(),
            default_formula_catalog(),
            default_pno_table(),
        );
        assert_eq!(plan.len(), 5);
        assert_eq!(plan[0].week, 1);
        assert_eq!(
            plan[0].formula.as_ref().map(|f| f.id.as_str()),
            Some("pno-vegetacion-s1-2")
        );
        // week 5 is past the last vegetation week
        assert_eq!(
            plan[4].formula.as_ref().map(|f| f.id.as_str()),
            Some("pno-vegetacion-s3-4")
        );
        assert!(plan.iter().all(|entry| entry.parameters.is_some()));

        assert!(weekly_plan(
            Stage::Vegetation,
            4,
            2,
            default_formula_schedule(),
            default_formula_catalog(),
            default_pno_table(),
        )
        .is_empty());
    }
}
