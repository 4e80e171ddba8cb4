//! Environmental impact simulation.
//!
//! Four slider inputs (trees, solar panels, EV adoption, green buildings) are
//! turned into weighted impact terms, which are summed into four percentage
//! impacts. Each impact is capped with `min(ceiling, value)`; there is no
//! proportional rescaling and no lower bound.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ceiling for the air-quality improvement percentage.
pub const POLLUTION_CEILING: f64 = 50.0;
/// Ceiling for the temperature reduction in degrees Celsius.
pub const TEMPERATURE_CEILING: f64 = 20.0;
/// Ceiling for the green coverage increase percentage.
pub const GREENERY_CEILING: f64 = 80.0;
/// Ceiling for the overall environmental score percentage.
pub const OVERALL_CEILING: f64 = 40.0;

/// Current slider positions of the simulation panel.
///
/// Values are whole numbers. The control surface keeps them inside each
/// parameter's range; the model accepts anything an `i32` can hold.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct SimulationInputs {
    /// Trees to plant
    pub tree_count: i32,
    /// Solar panels to install
    pub solar_panel_count: i32,
    /// Share of the vehicle fleet electrified, in percent
    pub ev_adoption_percent: i32,
    /// Buildings retrofitted
    pub green_building_count: i32,
}

impl Default for SimulationInputs {
    fn default() -> Self {
        Self {
            tree_count: Parameter::Trees.spec().default,
            solar_panel_count: Parameter::Solar.spec().default,
            ev_adoption_percent: Parameter::Ev.spec().default,
            green_building_count: Parameter::Buildings.spec().default,
        }
    }
}

impl SimulationInputs {
    pub fn new(
        tree_count: i32,
        solar_panel_count: i32,
        ev_adoption_percent: i32,
        green_building_count: i32,
    ) -> Self {
        Self {
            tree_count,
            solar_panel_count,
            ev_adoption_percent,
            green_building_count,
        }
    }

    /// Read the slider value for one parameter.
    pub fn get(&self, parameter: Parameter) -> i32 {
        match parameter {
            Parameter::Trees => self.tree_count,
            Parameter::Solar => self.solar_panel_count,
            Parameter::Ev => self.ev_adoption_percent,
            Parameter::Buildings => self.green_building_count,
        }
    }

    /// Return a copy with one parameter replaced, without any range checks.
    pub fn with(mut self, parameter: Parameter, value: i32) -> Self {
        match parameter {
            Parameter::Trees => self.tree_count = value,
            Parameter::Solar => self.solar_panel_count = value,
            Parameter::Ev => self.ev_adoption_percent = value,
            Parameter::Buildings => self.green_building_count = value,
        }
        self
    }

    /// Clamp every field into its slider range and snap it to the slider step.
    pub fn clamped(self) -> Self {
        Parameter::ALL
            .iter()
            .fold(self, |acc, p| acc.with(*p, p.spec().snap(acc.get(*p))))
    }

    /// True if every field already sits on a valid slider position.
    pub fn is_within_bounds(&self) -> bool {
        self.clamped() == *self
    }
}

/// One of the four simulation sliders.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parameter {
    Trees,
    Solar,
    Ev,
    Buildings,
}

/// Static description of a slider: bounds, step, default and labels.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ParameterSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub min: i32,
    pub max: i32,
    pub step: i32,
    pub default: i32,
    pub unit: &'static str,
    /// Short note on the real-world effect shown under the slider
    pub impact_note: &'static str,
}

impl ParameterSpec {
    /// Clamp `value` to `[min, max]` and round it to the nearest step.
    pub fn snap(&self, value: i32) -> i32 {
        let clamped = value.clamp(self.min, self.max);
        let offset = clamped - self.min;
        let steps = (offset + self.step / 2) / self.step;
        (self.min + steps * self.step).min(self.max)
    }

    /// Every slider position from `min` to `max` inclusive.
    pub fn positions(&self) -> impl Iterator<Item = i32> {
        (self.min..=self.max).step_by(self.step as usize)
    }
}

impl Parameter {
    pub const ALL: [Parameter; 4] = [
        Parameter::Trees,
        Parameter::Solar,
        Parameter::Ev,
        Parameter::Buildings,
    ];

    pub fn spec(&self) -> ParameterSpec {
        match self {
            Parameter::Trees => ParameterSpec {
                id: "trees",
                label: "Trees to Plant",
                min: 0,
                max: 2000,
                step: 50,
                default: 500,
                unit: "trees",
                impact_note: "Reduces CO₂ by ~5kg/tree/year",
            },
            Parameter::Solar => ParameterSpec {
                id: "solar",
                label: "Solar Panels",
                min: 0,
                max: 1000,
                step: 25,
                default: 200,
                unit: "panels",
                impact_note: "Generates ~4kWh/panel/day",
            },
            Parameter::Ev => ParameterSpec {
                id: "ev",
                label: "Electric Vehicle %",
                min: 0,
                max: 100,
                step: 5,
                default: 30,
                unit: "%",
                impact_note: "Reduces emissions by 60% per vehicle",
            },
            Parameter::Buildings => ParameterSpec {
                id: "buildings",
                label: "Green Buildings",
                min: 0,
                max: 50,
                step: 1,
                default: 15,
                unit: "buildings",
                impact_note: "Reduces energy use by 25%",
            },
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.spec().id)
    }
}

impl FromStr for Parameter {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Parameter::ALL
            .into_iter()
            .find(|p| p.spec().id == lowered)
            .ok_or_else(|| ModelError::UnknownParameter(s.to_string()))
    }
}

/// The weighted per-slider quantities that the impacts are built from.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct ImpactTerms {
    /// 2% per 100 trees
    pub tree: f64,
    /// 1.5% per 50 panels
    pub solar: f64,
    /// 0.5% per percentage point of EV adoption
    pub ev: f64,
    /// 1% per building
    pub building: f64,
}

impl ImpactTerms {
    pub fn from_inputs(inputs: &SimulationInputs) -> Self {
        Self {
            tree: (f64::from(inputs.tree_count) / 100.0) * 2.0,
            solar: (f64::from(inputs.solar_panel_count) / 50.0) * 1.5,
            ev: f64::from(inputs.ev_adoption_percent) * 0.5,
            building: f64::from(inputs.green_building_count),
        }
    }
}

/// Predicted impact of a set of simulation inputs.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct ImpactResult {
    pub pollution_improvement_percent: f64,
    pub temperature_reduction_degrees_c: f64,
    pub greenery_increase_percent: f64,
    pub overall_score_percent: f64,
}

/// A single "Predicted Impact" row: label, signed value text and bar fill.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct ImpactLine {
    pub label: &'static str,
    pub value_text: String,
    /// Progress bar fill on a 0..=100 scale
    pub progress: f64,
}

impl ImpactResult {
    /// Rows shown in the predicted impact card, in display order.
    ///
    /// The temperature bar is scaled by 5 so the 20 °C ceiling fills it.
    pub fn lines(&self) -> Vec<ImpactLine> {
        vec![
            ImpactLine {
                label: "Air Quality Improvement",
                value_text: format!("+{:.1}%", self.pollution_improvement_percent),
                progress: self.pollution_improvement_percent,
            },
            ImpactLine {
                label: "Temperature Reduction",
                value_text: format!("-{:.1}°C", self.temperature_reduction_degrees_c),
                progress: self.temperature_reduction_degrees_c * 5.0,
            },
            ImpactLine {
                label: "Green Coverage",
                value_text: format!("+{:.1}%", self.greenery_increase_percent),
                progress: self.greenery_increase_percent,
            },
        ]
    }

    /// Overall environmental score as shown in the summary box.
    pub fn overall_text(&self) -> String {
        format!("+{:.1}%", self.overall_score_percent)
    }
}

/// Compute the predicted impact of the given slider positions.
///
/// Total over all `i32` inputs. Large inputs saturate at each ceiling;
/// negative inputs pass through uncapped on the low side.
pub fn compute_impact(inputs: &SimulationInputs) -> ImpactResult {
    let t = ImpactTerms::from_inputs(inputs);
    ImpactResult {
        pollution_improvement_percent: POLLUTION_CEILING.min(t.tree + t.solar + t.ev),
        temperature_reduction_degrees_c: TEMPERATURE_CEILING.min(t.tree * 0.5 + t.solar * 0.3),
        greenery_increase_percent: GREENERY_CEILING.min(t.tree * 2.0 + t.building),
        overall_score_percent: OVERALL_CEILING
            .min((t.tree + t.solar + t.ev + t.building) / 4.0),
    }
}

/// The slider positions the panel starts from and returns to on reset.
pub fn reset_to_defaults() -> SimulationInputs {
    SimulationInputs::default()
}

/// Impact at every slider position of `parameter`, holding the others at `base`.
pub fn sweep(base: &SimulationInputs, parameter: Parameter) -> Vec<(i32, ImpactResult)> {
    parameter
        .spec()
        .positions()
        .map(|value| (value, compute_impact(&base.with(parameter, value))))
        .collect()
}
