//! HTTP handlers for the Cultivation Management Platform API

pub mod crop;
pub mod formula;
pub mod health;
pub mod monitoring;
pub mod parameters;

pub use crop::*;
pub use formula::*;
pub use health::*;
pub use monitoring::*;
pub use parameters::*;
