//! Business logic services for the Cultivation Management Platform

pub mod crop;
pub mod formula;
pub mod monitoring;
pub mod parameters;

pub use crop::CropService;
pub use formula::FormulaService;
pub use monitoring::MonitoringService;
pub use parameters::ParameterService;
