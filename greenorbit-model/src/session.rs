//! Control-surface state for the simulation panel.
//!
//! `SimulationSession` owns the slider positions and the "simulation running"
//! flag. Every write goes through the slider bounds, so the model only ever
//! sees clamped inputs from here.

use crate::simulation::{compute_impact, reset_to_defaults, ImpactResult, Parameter, SimulationInputs};
use log::debug;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSession {
    inputs: SimulationInputs,
    active: bool,
}

impl Default for SimulationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationSession {
    /// Start at the default slider positions with the simulation stopped.
    pub fn new() -> Self {
        Self {
            inputs: reset_to_defaults(),
            active: false,
        }
    }

    /// Start from arbitrary inputs; out-of-range values are clamped and snapped.
    pub fn with_inputs(inputs: SimulationInputs) -> Self {
        Self {
            inputs: inputs.clamped(),
            active: false,
        }
    }

    pub fn inputs(&self) -> SimulationInputs {
        self.inputs
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Move one slider. Returns the value actually stored.
    pub fn set(&mut self, parameter: Parameter, value: i32) -> i32 {
        let stored = parameter.spec().snap(value);
        if stored != value {
            debug!("{parameter} value {value} adjusted to {stored}");
        }
        self.inputs = self.inputs.with(parameter, stored);
        stored
    }

    /// Flip between running and stopped.
    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        debug!("simulation active: {}", self.active);
        self.active
    }

    /// Restore default slider positions and stop the simulation.
    pub fn reset(&mut self) {
        self.inputs = reset_to_defaults();
        self.active = false;
        debug!("simulation reset to defaults");
    }

    /// Predicted impact for the current slider positions.
    pub fn impact(&self) -> ImpactResult {
        compute_impact(&self.inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_uses_defaults_and_is_stopped() {
        let session = SimulationSession::new();
        assert_eq!(session.inputs(), SimulationInputs::new(500, 200, 30, 15));
        assert!(!session.is_active());
        assert_eq!(session.impact(), compute_impact(&reset_to_defaults()));
    }

    #[test]
    fn test_set_clamps_and_snaps() {
        let mut session = SimulationSession::new();
        assert_eq!(session.set(Parameter::Trees, 3000), 2000);
        assert_eq!(session.set(Parameter::Solar, -40), 0);
        assert_eq!(session.set(Parameter::Ev, 42), 40);
        assert_eq!(session.set(Parameter::Buildings, 12), 12);
        assert_eq!(session.inputs(), SimulationInputs::new(2000, 0, 40, 12));
    }

    #[test]
    fn test_impact_follows_latest_inputs() {
        let mut session = SimulationSession::new();
        let before = session.impact();
        session.set(Parameter::Trees, 1000);
        let after = session.impact();
        assert!(after.greenery_increase_percent > before.greenery_increase_percent);
        assert_eq!(after, compute_impact(&session.inputs()));
    }

    #[test]
    fn test_toggle_and_reset() {
        let mut session = SimulationSession::new();
        assert!(session.toggle());
        session.set(Parameter::Buildings, 50);
        session.reset();
        assert!(!session.is_active());
        assert_eq!(session.inputs(), reset_to_defaults());
        assert!(session.toggle());
    }

    #[test]
    fn test_with_inputs_clamps() {
        let session = SimulationSession::with_inputs(SimulationInputs::new(-1, 1001, 7, 99));
        assert_eq!(session.inputs(), SimulationInputs::new(0, 1000, 5, 50));
    }
}
