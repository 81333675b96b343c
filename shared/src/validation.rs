//! Validation utilities for the Cultivation Management Platform

use crate::models::{Crop, FormulaCatalog, FormulaSchedule, Stage};

/// Longest stage week accepted from users
pub const MAX_STAGE_WEEK: u32 = 52;

// ============================================================================
// Crop Validations
// ============================================================================

/// Validate that recorded transition dates follow the lifecycle: no stage is
/// skipped and no date precedes the one before it
pub fn validate_transition_order(crop: &Crop) -> Result<(), &'static str> {
    let mut previous = crop.cloning_date;
    let mut gap = false;

    for stage in Stage::ALL.into_iter().skip(1) {
        match crop.transition_date(stage) {
            Some(_) if gap => return Err("Transition dates skip a stage"),
            Some(date) if date < previous => {
                return Err("Transition dates must not go back in time")
            }
            Some(date) => previous = date,
            None => gap = true,
        }
    }
    Ok(())
}

/// Validate crop name (1-100 characters, not blank)
pub fn validate_crop_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Crop name cannot be empty");
    }
    if name.chars().count() > 100 {
        return Err("Crop name must be at most 100 characters");
    }
    Ok(())
}

// ============================================================================
// Schedule Validations
// ============================================================================

/// Validate a stage week number (1-based)
pub fn validate_week(week: u32) -> Result<(), &'static str> {
    if week == 0 {
        return Err("Week numbers start at 1");
    }
    if week > MAX_STAGE_WEEK {
        return Err("Week number exceeds 52");
    }
    Ok(())
}

/// Validate that every scheduled formula exists in the catalog
pub fn validate_schedule(
    schedule: &FormulaSchedule,
    catalog: &FormulaCatalog,
) -> Result<(), &'static str> {
    if schedule.iter().any(|(_, _, id)| !catalog.contains(id)) {
        return Err("Schedule references a formula that is not in the catalog");
    }
    if schedule.iter().any(|(_, week, _)| week == 0) {
        return Err("Schedule contains week 0");
    }
    Ok(())
}

/// Validate formula id format: lowercase letters, digits and dashes
/// (e.g. `pno-floracion-s3-6`)
pub fn validate_formula_id(id: &str) -> Result<(), &'static str> {
    if id.is_empty() {
        return Err("Formula id cannot be empty");
    }
    if id.starts_with('-') || id.ends_with('-') {
        return Err("Formula id cannot start or end with a dash");
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err("Formula id must be lowercase alphanumeric with dashes");
    }
    Ok(())
}

// ============================================================================
// Monitoring Validations
// ============================================================================

/// Validate a warning/danger tolerance pair
pub fn validate_tolerances(warning: f64, danger: Option<f64>) -> Result<(), &'static str> {
    let danger = danger.unwrap_or(warning);
    if !warning.is_finite() || !danger.is_finite() {
        return Err("Tolerances must be finite numbers");
    }
    if warning < 0.0 || danger < 0.0 {
        return Err("Tolerances cannot be negative");
    }
    if danger < warning {
        return Err("Danger tolerance must not be smaller than warning tolerance");
    }
    Ok(())
}

/// Validate a tank volume in litres
pub fn validate_tank_volume(liters: rust_decimal::Decimal) -> Result<(), &'static str> {
    if liters <= rust_decimal::Decimal::ZERO {
        return Err("Tank volume must be greater than 0");
    }
    Ok(())
}
