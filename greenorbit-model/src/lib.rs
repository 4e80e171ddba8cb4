//! Core types for the GreenOrbit environmental dashboard.
//!
//! - `simulation`: the what-if impact model (slider inputs to capped impacts)
//! - `session`: owned control-surface state around the model
//! - `layer`: the four environmental map layers and their display mappings
//! - `city_point`, `issue`, `metrics`: the embedded mock datasets

pub mod city_point;
pub mod error;
pub mod issue;
pub mod layer;
pub mod metrics;
pub mod session;
pub mod simulation;
pub mod tone;

pub use error::{ModelError, Result};
pub use layer::{Layer, Level};
pub use session::SimulationSession;
pub use simulation::{compute_impact, reset_to_defaults, ImpactResult, SimulationInputs};
