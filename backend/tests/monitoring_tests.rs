//! Tests for evaluating room readings against PNO targets

use proptest::prelude::*;
use shared::{
    evaluate_reading, overall_status, resolve_parameters, EnvironmentReading, ParameterKind,
    RangeStatus, Stage, ToleranceProfile,
};

#[test]
fn test_vegetation_reading_in_range() {
    let params = resolve_parameters(Stage::Vegetation, 2).unwrap();
    let reading = EnvironmentReading {
        temperature: params.temperature_day.midpoint(),
        humidity: params.humidity_day.midpoint(),
        vpd: params.vpd.midpoint(),
        ph: params.ph.midpoint(),
        ..Default::default()
    };
    let deviations = evaluate_reading(&reading, params, &ToleranceProfile::default());
    assert!(deviations.is_empty());
}

#[test]
fn test_flush_week_high_ppm_is_danger() {
    let params = resolve_parameters(Stage::Flowering, 9).unwrap();
    let reading = EnvironmentReading {
        ppm: Some(900.0),
        co2: Some(3000.0),
        ..Default::default()
    };
    let deviations = evaluate_reading(&reading, params, &ToleranceProfile::default());
    assert_eq!(deviations.len(), 1);
    assert_eq!(deviations[0].parameter, ParameterKind::Ppm);
    assert_eq!(overall_status(&deviations), RangeStatus::Danger);
}

#[test]
fn test_empty_reading_has_no_deviations() {
    let params = resolve_parameters(Stage::Cloning, 1).unwrap();
    let deviations =
        evaluate_reading(&EnvironmentReading::default(), params, &ToleranceProfile::default());
    assert!(deviations.is_empty());
    assert_eq!(overall_status(&deviations), RangeStatus::InRange);
}

proptest! {
    /// Only the parameters that were measured can deviate
    #[test]
    fn test_deviations_only_for_measured_values(
        temperature in proptest::option::of(0.0f64..50.0),
        humidity in proptest::option::of(0.0f64..100.0),
        is_daytime in any::<bool>(),
    ) {
        let params = resolve_parameters(Stage::Flowering, 4).unwrap();
        let reading = EnvironmentReading {
            temperature,
            humidity,
            is_daytime,
            ..Default::default()
        };
        let deviations = evaluate_reading(&reading, params, &ToleranceProfile::default());
        for deviation in &deviations {
            prop_assert!(reading.value(deviation.parameter).is_some());
            prop_assert_ne!(deviation.status, RangeStatus::InRange);
        }
        prop_assert!(deviations.len() <= 2);
    }
}
