//! Domain models for the Cultivation Management Platform

mod crop;
mod formula;
mod pno;
mod schedule;
mod stage;

pub use crop::*;
pub use formula::*;
pub use pno::*;
pub use schedule::*;
pub use stage::*;
