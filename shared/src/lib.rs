//! Shared types and models for the Cultivation Management Platform
//!
//! This crate contains the crop lifecycle and nutrition scheduling logic
//! shared between the backend, the frontend (via WASM) and other components.

pub mod catalog;
pub mod models;
pub mod monitoring;
pub mod ranges;
pub mod scheduling;
pub mod types;
pub mod validation;

pub use models::*;
pub use monitoring::*;
pub use ranges::*;
pub use scheduling::*;
pub use types::*;
pub use validation::*;
