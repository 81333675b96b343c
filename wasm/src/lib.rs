//! WebAssembly module for the Cultivation Management Platform
//!
//! Provides client-side computation for:
//! - Crop stage and week resolution
//! - Formula and PNO parameter lookups
//! - Range checks for room readings
//! - Tank mix calculations

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::monitoring::*;
pub use shared::ranges::*;
pub use shared::types::*;

use shared::catalog::{default_formula_catalog, default_formula_schedule};
use shared::validate_tank_volume;

fn js_error(context: &str, error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, error))
}

fn parse_stage(stage: &str) -> Result<Stage, JsValue> {
    stage.parse::<Stage>().map_err(|e| js_error("Invalid stage", e))
}

/// RFC 3339 date, or the browser clock when absent
fn evaluation_date(date: Option<String>) -> Result<DateTime<Utc>, JsValue> {
    match date {
        Some(raw) => DateTime::parse_from_rfc3339(&raw)
            .map(|d| d.with_timezone(&Utc))
            .map_err(|e| js_error("Invalid evaluation date", e)),
        None => DateTime::from_timestamp_millis(js_sys::Date::now() as i64)
            .ok_or_else(|| JsValue::from_str("Browser clock out of range")),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| js_error("Serialization failed", e))
}

/// Resolve a crop's stage. Returns StageInfo as JSON.
#[wasm_bindgen]
pub fn resolve_crop_stage(
    crop_json: &str,
    evaluation_date_iso: Option<String>,
) -> Result<String, JsValue> {
    let crop: Crop =
        serde_json::from_str(crop_json).map_err(|e| js_error("Invalid crop JSON", e))?;
    let at = evaluation_date(evaluation_date_iso)?;
    to_json(&shared::resolve_stage(&crop, at))
}

/// Formula id scheduled for a stage/week in the built-in schedule
#[wasm_bindgen]
pub fn formula_id_for_week(stage: &str, week: u32) -> Result<Option<String>, JsValue> {
    let stage = parse_stage(stage)?;
    Ok(shared::resolve_formula_id(stage, week, default_formula_schedule()).map(str::to_string))
}

/// Full formula for a stage/week as JSON, `null` when none is scheduled
#[wasm_bindgen]
pub fn formula_for_week(stage: &str, week: u32) -> Result<String, JsValue> {
    let stage = parse_stage(stage)?;
    to_json(&shared::resolve_formula(
        stage,
        week,
        default_formula_schedule(),
        default_formula_catalog(),
    ))
}

/// PNO targets for a stage/week as JSON, `null` when none are defined
#[wasm_bindgen]
pub fn pno_parameters_for_week(stage: &str, week: u32) -> Result<String, JsValue> {
    let stage = parse_stage(stage)?;
    to_json(&shared::resolve_parameters(stage, week))
}

/// Boolean range test. `target_json` is `"ambient"`, a number or `[min, max]`.
#[wasm_bindgen]
pub fn is_value_out_of_range(
    value: f64,
    target_json: &str,
    tolerance: Option<f64>,
) -> Result<bool, JsValue> {
    let target: ParameterTarget =
        serde_json::from_str(target_json).map_err(|e| js_error("Invalid target JSON", e))?;
    Ok(is_out_of_range(
        value,
        &target,
        tolerance.unwrap_or(DEFAULT_OUT_OF_RANGE_TOLERANCE),
    ))
}

/// Tiered classification: "in_range", "warning" or "danger"
#[wasm_bindgen]
pub fn classify_value(
    value: f64,
    target_json: &str,
    warning_tolerance: f64,
    danger_tolerance: Option<f64>,
) -> Result<String, JsValue> {
    let target: ParameterTarget =
        serde_json::from_str(target_json).map_err(|e| js_error("Invalid target JSON", e))?;
    Ok(classify(value, &target, warning_tolerance, danger_tolerance).to_string())
}

/// Evaluate a room reading for a stage/week with default tolerances.
/// Returns the deviations as JSON (empty array when everything is in range).
#[wasm_bindgen]
pub fn evaluate_environment_reading(
    stage: &str,
    week: u32,
    reading_json: &str,
) -> Result<String, JsValue> {
    let stage = parse_stage(stage)?;
    let reading: EnvironmentReading =
        serde_json::from_str(reading_json).map_err(|e| js_error("Invalid reading JSON", e))?;
    let deviations = match shared::resolve_parameters(stage, week) {
        Some(parameters) => evaluate_reading(&reading, parameters, &ToleranceProfile::default()),
        None => Vec::new(),
    };
    to_json(&deviations)
}

/// Product amounts (ml) for a tank of `liters` using the scheduled formula
#[wasm_bindgen]
pub fn calculate_tank_mix(stage: &str, week: u32, liters: f64) -> Result<String, JsValue> {
    let stage = parse_stage(stage)?;
    let liters = Decimal::try_from(liters).map_err(|e| js_error("Invalid tank volume", e))?;
    validate_tank_volume(liters).map_err(JsValue::from_str)?;
    let schedule = default_formula_schedule();
    let mix = shared::resolve_formula(stage, week, schedule, default_formula_catalog())
        .map(|formula| formula.tank_mix(liters))
        .unwrap_or_default();
    to_json(&mix)
}

/// Stage label in Spanish ("es") or English ("en")
#[wasm_bindgen]
pub fn stage_label(stage: &str, language: &str) -> Result<String, JsValue> {
    let stage = parse_stage(stage)?;
    let language = language.parse::<Language>().unwrap_or_default();
    Ok(stage.label(language).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CROP: &str = r#"{
        "id": "0f8fad5b-d9cb-469f-a165-70867728950e",
        "name": "Batch 4",
        "cloning_date": "2024-01-01T00:00:00Z",
        "pre_vegetation_date": "2024-01-15T00:00:00Z",
        "vegetation_date": "2024-01-29T00:00:00Z",
        "flowering_date": "2024-02-26T00:00:00Z"
    }"#;

    #[test]
    fn test_resolve_crop_stage() {
        let json = resolve_crop_stage(CROP, Some("2024-03-12T12:00:00Z".to_string())).unwrap();
        let info: StageInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(info.stage, Stage::Flowering);
        assert_eq!(info.days_in_stage, 15);
        assert_eq!(info.week_in_stage, 3);
    }

    #[test]
    fn test_formula_id_for_week() {
        assert_eq!(
            formula_id_for_week("FLOWERING", 3).unwrap(),
            Some("pno-floracion-s3-6".to_string())
        );
        assert_eq!(
            formula_id_for_week("FLOWERING", 15).unwrap(),
            Some("pno-lavado-s9".to_string())
        );
        assert_eq!(formula_id_for_week("HARVESTED", 1).unwrap(), None);
    }

    #[test]
    fn test_pno_parameters_for_missing_stage() {
        assert_eq!(pno_parameters_for_week("HARVESTED", 1).unwrap(), "null");
        assert!(pno_parameters_for_week("CLONING", 1).unwrap().contains("target_ppm"));
    }

    #[test]
    fn test_is_value_out_of_range() {
        assert!(!is_value_out_of_range(100.0, "100", None).unwrap());
        assert!(is_value_out_of_range(80.0, "100", Some(0.1)).unwrap());
        assert!(!is_value_out_of_range(80.0, "\"ambient\"", None).unwrap());
    }

    #[test]
    fn test_classify_value() {
        assert_eq!(classify_value(62.0, "[60, 70]", 2.0, Some(5.0)).unwrap(), "in_range");
        assert_eq!(classify_value(58.0, "[60, 70]", 2.0, Some(5.0)).unwrap(), "warning");
    }

    #[test]
    fn test_evaluate_environment_reading() {
        let json = evaluate_environment_reading("FLOWERING", 3, r#"{"ppm": 600}"#).unwrap();
        let deviations: Vec<ParameterDeviation> = serde_json::from_str(&json).unwrap();
        assert_eq!(deviations.len(), 1);
        assert_eq!(deviations[0].status, RangeStatus::Danger);
    }

    #[test]
    fn test_calculate_tank_mix() {
        let json = calculate_tank_mix("VEGETATION", 1, 10.0).unwrap();
        let mix: Vec<TankMixLine> = serde_json::from_str(&json).unwrap();
        assert_eq!(mix.len(), 3);
        assert_eq!(mix[0].millilitres, Decimal::from(15));
        assert_eq!(calculate_tank_mix("HARVESTED", 1, 10.0).unwrap(), "[]");
    }

    #[test]
    fn test_stage_label() {
        assert_eq!(stage_label("FLOWERING", "es").unwrap(), "Floración");
        assert_eq!(stage_label("FLOWERING", "en").unwrap(), "Flowering");
    }
}
