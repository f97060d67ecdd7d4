//! Probe plan file loading and parsing.
mod loader;
mod types;


pub use loader::load_plan;
pub use types::{DurationValue, PlanFile, ProbeEntry};
