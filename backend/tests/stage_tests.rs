//! Tests for crop stage resolution
//! Verifies stage selection, day/week arithmetic and transition rules

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use shared::{resolve_stage, validate_transition_order, Crop, Stage, TransitionError};

/// Helper to create a date `n` days after a fixed cloning date
fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 6, 0, 0).unwrap() + Duration::days(n)
}

fn full_cycle_crop() -> Crop {
    let mut crop = Crop::new("Full cycle", day(0));
    crop.pre_vegetation_date = Some(day(14));
    crop.vegetation_date = Some(day(28));
    crop.flowering_date = Some(day(56));
    crop.drying_curing_date = Some(day(119));
    crop.harvest_date = Some(day(133));
    crop
}

// =============================================================================
// Stage selection
// =============================================================================

mod stage_selection {
    use super::*;

    #[test]
    fn test_most_advanced_recorded_stage_wins() {
        let crop = full_cycle_crop();
        let cases = [
            (0, Stage::Cloning),
            (13, Stage::Cloning),
            (14, Stage::PreVegetation),
            (30, Stage::Vegetation),
            (56, Stage::Flowering),
            (120, Stage::DryingCuring),
            (200, Stage::Harvested),
        ];
        for (offset, expected) in cases {
            assert_eq!(resolve_stage(&crop, day(offset)).stage, expected, "day {}", offset);
        }
    }

    #[test]
    fn test_future_transition_is_ignored() {
        let mut crop = Crop::new("Future", day(0));
        crop.vegetation_date = Some(day(40));
        let info = resolve_stage(&crop, day(20));
        assert_eq!(info.stage, Stage::Cloning);
        assert_eq!(info.stage_start_date, day(0));
    }

    #[test]
    fn test_skipped_stages_are_tolerated() {
        let mut crop = Crop::new("Straight to flower", day(0));
        crop.flowering_date = Some(day(10));
        let info = resolve_stage(&crop, day(12));
        assert_eq!(info.stage, Stage::Flowering);
        assert_eq!(info.days_in_stage, 2);
        assert!(validate_transition_order(&crop).is_err());
    }

    #[test]
    fn test_harvested_cannot_transition() {
        let info = resolve_stage(&full_cycle_crop(), day(140));
        assert_eq!(info.stage, Stage::Harvested);
        assert!(!info.can_transition);
        assert_eq!(info.next_stage, None);
    }
}

// =============================================================================
// Day and week arithmetic
// =============================================================================

mod week_arithmetic {
    use super::*;

    #[test]
    fn test_vegetation_day_ten() {
        let mut crop = Crop::new("Veg", day(0));
        crop.pre_vegetation_date = Some(day(10));
        crop.vegetation_date = Some(day(20));
        let info = resolve_stage(&crop, day(30));
        assert_eq!(info.stage, Stage::Vegetation);
        assert_eq!(info.days_in_stage, 10);
        assert_eq!(info.week_in_stage, 2);
        assert_eq!(info.day_of_week_in_stage, 4);
        assert_eq!(info.total_days, 30);
        assert_eq!(info.total_week, 5);
        assert_eq!(info.total_day_of_week, 3);
        assert!(info.can_transition);
        assert_eq!(info.next_stage, Some(Stage::Flowering));
    }

    #[test]
    fn test_partial_days_are_truncated() {
        let crop = Crop::new("Partial", day(0));
        let info = resolve_stage(&crop, day(6) + Duration::hours(23));
        assert_eq!(info.days_in_stage, 6);
        assert_eq!(info.week_in_stage, 1);
        assert_eq!(info.day_of_week_in_stage, 7);
    }

    #[test]
    fn test_evaluation_before_cloning_clamps_to_zero() {
        let crop = Crop::new("Not yet", day(5));
        let info = resolve_stage(&crop, day(0));
        assert_eq!(info.stage, Stage::Cloning);
        assert_eq!(info.days_in_stage, 0);
        assert_eq!(info.total_days, 0);
        assert_eq!(info.week_in_stage, 1);
        assert_eq!(info.day_of_week_in_stage, 1);
    }
}

// =============================================================================
// Transitions
// =============================================================================

mod transitions {
    use super::*;

    #[test]
    fn test_full_cycle_is_valid() {
        assert!(validate_transition_order(&full_cycle_crop()).is_ok());
    }

    #[test]
    fn test_recording_past_harvest_fails() {
        let mut crop = full_cycle_crop();
        assert_eq!(
            crop.record_transition(Stage::Harvested, day(150)),
            Err(TransitionError::AlreadyHarvested)
        );
    }

    #[test]
    fn test_recording_out_of_order_fails() {
        let mut crop = Crop::new("Order", day(0));
        assert!(matches!(
            crop.record_transition(Stage::Flowering, day(20)),
            Err(TransitionError::NotNextStage { .. })
        ));
        assert_eq!(crop.flowering_date, None);
    }
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// A crop with only a cloning date spends its whole life in cloning
    #[test]
    fn test_cloning_only_days_match_total(offset in 0i64..2000, hours in 0i64..24) {
        let crop = Crop::new("Clone", day(0));
        let info = resolve_stage(&crop, day(offset) + Duration::hours(hours));
        prop_assert_eq!(info.stage, Stage::Cloning);
        prop_assert_eq!(info.days_in_stage, info.total_days);
        prop_assert_eq!(info.days_in_stage, offset);
    }

    /// Week and day-of-week always reconstruct the day count
    #[test]
    fn test_week_position_is_consistent(offset in 0i64..5000) {
        let crop = Crop::new("Clone", day(0));
        let info = resolve_stage(&crop, day(offset));
        prop_assert!((1..=7).contains(&info.day_of_week_in_stage));
        let rebuilt = (info.week_in_stage as i64 - 1) * 7 + info.day_of_week_in_stage as i64 - 1;
        prop_assert_eq!(rebuilt, info.days_in_stage);
    }

    /// Evaluations before the cloning date never produce negative counts
    #[test]
    fn test_before_cloning_never_negative(before in 1i64..1000) {
        let crop = Crop::new("Early", day(0));
        let info = resolve_stage(&crop, day(-before));
        prop_assert_eq!(info.days_in_stage, 0);
        prop_assert_eq!(info.total_days, 0);
    }

    /// Days in stage never exceed days since cloning for well ordered crops
    #[test]
    fn test_stage_days_bounded_by_total(offset in 0i64..400) {
        let info = resolve_stage(&full_cycle_crop(), day(offset));
        prop_assert!(info.days_in_stage <= info.total_days);
    }
}
