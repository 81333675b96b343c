//! Built-in reference data: formula catalog, formula schedule and PNO table
//!
//! Week ranges follow the grow room's standard procedure: 2 weeks of cloning,
//! 2 of pre-vegetation, 4 of vegetation, 9 of flowering (the last one a
//! flush) and 2 of drying/curing. Harvested crops have no targets.

use std::str::FromStr;
use std::sync::OnceLock;

use rust_decimal::Decimal;

use crate::models::{
    Formula, FormulaCatalog, FormulaSchedule, NutrientDose, ParameterTarget, PnoParameterSet,
    PnoTable, Stage,
};

/// Shared instance of [`formula_catalog`]
pub fn default_formula_catalog() -> &'static FormulaCatalog {
    static CATALOG: OnceLock<FormulaCatalog> = OnceLock::new();
    CATALOG.get_or_init(formula_catalog)
}

/// Shared instance of [`formula_schedule`]
pub fn default_formula_schedule() -> &'static FormulaSchedule {
    static SCHEDULE: OnceLock<FormulaSchedule> = OnceLock::new();
    SCHEDULE.get_or_init(formula_schedule)
}

/// Shared instance of [`pno_table`]
pub fn default_pno_table() -> &'static PnoTable {
    static TABLE: OnceLock<PnoTable> = OnceLock::new();
    TABLE.get_or_init(pno_table)
}

fn dose(product: &str, ml_per_liter: &str) -> NutrientDose {
    NutrientDose {
        product: product.to_string(),
        ml_per_liter: Decimal::from_str(ml_per_liter).unwrap_or(Decimal::ZERO),
    }
}

fn formula(
    id: &str,
    name: &str,
    stage: Stage,
    nutrients: Vec<NutrientDose>,
    target_ppm: u32,
    target_ph: &str,
) -> Formula {
    Formula {
        id: id.to_string(),
        name: name.to_string(),
        stage,
        nutrients,
        target_ppm: Some(target_ppm),
        target_ph: Decimal::from_str(target_ph).ok(),
        notes: None,
    }
}

pub fn formula_catalog() -> FormulaCatalog {
    let mut flush = formula(
        "pno-lavado-s9",
        "Lavado final",
        Stage::Flowering,
        Vec::new(),
        150,
        "6.2",
    );
    flush.notes = Some("Agua sola, sin nutrientes, hasta la cosecha".to_string());

    FormulaCatalog::new(vec![
        formula(
            "pno-esquejes-s1-2",
            "Esquejes semanas 1-2",
            Stage::Cloning,
            vec![dose("Estimulador de raíces", "1.0"), dose("Cal-Mag", "0.3")],
            400,
            "5.8",
        ),
        formula(
            "pno-prevegetacion-s1-2",
            "Prevegetación semanas 1-2",
            Stage::PreVegetation,
            vec![
                dose("Base Crecimiento A", "1.0"),
                dose("Base Crecimiento B", "1.0"),
                dose("Estimulador de raíces", "0.5"),
                dose("Cal-Mag", "0.5"),
            ],
            600,
            "5.9",
        ),
        formula(
            "pno-vegetacion-s1-2",
            "Vegetación semanas 1-2",
            Stage::Vegetation,
            vec![
                dose("Base Crecimiento A", "1.5"),
                dose("Base Crecimiento B", "1.5"),
                dose("Cal-Mag", "0.8"),
            ],
            800,
            "6.0",
        ),
        formula(
            "pno-vegetacion-s3-4",
            "Vegetación semanas 3-4",
            Stage::Vegetation,
            vec![
                dose("Base Crecimiento A", "2.0"),
                dose("Base Crecimiento B", "2.0"),
                dose("Cal-Mag", "1.0"),
            ],
            1000,
            "6.0",
        ),
        formula(
            "pno-floracion-s1-2",
            "Floración semanas 1-2",
            Stage::Flowering,
            vec![
                dose("Base Floración A", "2.0"),
                dose("Base Floración B", "2.0"),
                dose("Cal-Mag", "1.0"),
                dose("Estimulador de floración", "0.5"),
            ],
            1100,
            "6.2",
        ),
        formula(
            "pno-floracion-s3-6",
            "Floración semanas 3-6",
            Stage::Flowering,
            vec![
                dose("Base Floración A", "2.5"),
                dose("Base Floración B", "2.5"),
                dose("PK 13/14", "0.5"),
                dose("Estimulador de floración", "1.0"),
            ],
            1300,
            "6.2",
        ),
        formula(
            "pno-floracion-s7-8",
            "Floración semanas 7-8",
            Stage::Flowering,
            vec![
                dose("Base Floración A", "1.5"),
                dose("Base Floración B", "1.5"),
                dose("Enzimas", "1.0"),
            ],
            1000,
            "6.3",
        ),
        flush,
    ])
}

pub fn formula_schedule() -> FormulaSchedule {
    let mut schedule = FormulaSchedule::new();
    schedule
        .fill(Stage::Cloning, 1..=2, "pno-esquejes-s1-2".to_string())
        .fill(Stage::PreVegetation, 1..=2, "pno-prevegetacion-s1-2".to_string())
        .fill(Stage::Vegetation, 1..=2, "pno-vegetacion-s1-2".to_string())
        .fill(Stage::Vegetation, 3..=4, "pno-vegetacion-s3-4".to_string())
        .fill(Stage::Flowering, 1..=2, "pno-floracion-s1-2".to_string())
        .fill(Stage::Flowering, 3..=6, "pno-floracion-s3-6".to_string())
        .fill(Stage::Flowering, 7..=8, "pno-floracion-s7-8".to_string())
        .insert(Stage::Flowering, 9, "pno-lavado-s9".to_string());
    schedule
}

fn range(min: f64, max: f64) -> ParameterTarget {
    ParameterTarget::range(min, max)
}

pub fn pno_table() -> PnoTable {
    use ParameterTarget::{Ambient, Value};

    let cloning = PnoParameterSet {
        temperature_day: range(24.0, 26.0),
        temperature_night: range(22.0, 24.0),
        humidity_day: range(70.0, 80.0),
        humidity_night: range(75.0, 85.0),
        vpd: range(0.4, 0.8),
        co2: Ambient,
        ppfd: range(100.0, 200.0),
        ph: range(5.8, 6.2),
        target_ppm: Value(400.0),
    };
    let pre_vegetation = PnoParameterSet {
        temperature_day: range(24.0, 27.0),
        temperature_night: range(21.0, 24.0),
        humidity_day: range(65.0, 70.0),
        humidity_night: range(65.0, 75.0),
        vpd: range(0.8, 1.0),
        co2: Ambient,
        ppfd: range(200.0, 400.0),
        ph: range(5.8, 6.2),
        target_ppm: Value(600.0),
    };
    let vegetation_early = PnoParameterSet {
        temperature_day: range(24.0, 28.0),
        temperature_night: range(20.0, 24.0),
        humidity_day: range(55.0, 70.0),
        humidity_night: range(60.0, 70.0),
        vpd: range(0.8, 1.2),
        co2: Value(800.0),
        ppfd: range(400.0, 600.0),
        ph: range(5.8, 6.3),
        target_ppm: Value(800.0),
    };
    let vegetation_late = PnoParameterSet {
        target_ppm: Value(1000.0),
        ppfd: range(500.0, 700.0),
        ..vegetation_early.clone()
    };
    let flowering_early = PnoParameterSet {
        temperature_day: range(24.0, 27.0),
        temperature_night: range(20.0, 23.0),
        humidity_day: range(50.0, 60.0),
        humidity_night: range(55.0, 60.0),
        vpd: range(1.0, 1.4),
        co2: Value(1000.0),
        ppfd: range(600.0, 900.0),
        ph: range(6.0, 6.5),
        target_ppm: Value(1100.0),
    };
    let flowering_peak = PnoParameterSet {
        humidity_day: range(45.0, 55.0),
        humidity_night: range(45.0, 55.0),
        co2: Value(1200.0),
        ppfd: range(800.0, 1000.0),
        target_ppm: Value(1300.0),
        ..flowering_early.clone()
    };
    let flowering_ripening = PnoParameterSet {
        temperature_day: range(22.0, 26.0),
        temperature_night: range(18.0, 21.0),
        humidity_day: range(40.0, 50.0),
        humidity_night: range(40.0, 50.0),
        vpd: range(1.2, 1.5),
        co2: Value(1000.0),
        ppfd: range(800.0, 1000.0),
        ph: range(6.0, 6.5),
        target_ppm: Value(1000.0),
    };
    let flush = PnoParameterSet {
        humidity_day: range(35.0, 45.0),
        humidity_night: range(35.0, 45.0),
        co2: Ambient,
        ppfd: range(600.0, 800.0),
        target_ppm: Value(150.0),
        ..flowering_ripening.clone()
    };
    let drying_curing = PnoParameterSet {
        temperature_day: range(18.0, 21.0),
        temperature_night: range(18.0, 21.0),
        humidity_day: range(55.0, 62.0),
        humidity_night: range(55.0, 62.0),
        vpd: Ambient,
        co2: Ambient,
        ppfd: Value(0.0),
        ph: Ambient,
        target_ppm: Ambient,
    };

    let mut table = PnoTable::new();
    table
        .fill(Stage::Cloning, 1..=2, cloning)
        .fill(Stage::PreVegetation, 1..=2, pre_vegetation)
        .fill(Stage::Vegetation, 1..=2, vegetation_early)
        .fill(Stage::Vegetation, 3..=4, vegetation_late)
        .fill(Stage::Flowering, 1..=2, flowering_early)
        .fill(Stage::Flowering, 3..=6, flowering_peak)
        .fill(Stage::Flowering, 7..=8, flowering_ripening)
        .insert(Stage::Flowering, 9, flush)
        .fill(Stage::DryingCuring, 1..=2, drying_curing);
    table
}
