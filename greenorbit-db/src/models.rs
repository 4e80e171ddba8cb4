//! Query result model structs for the dashboard views.
//!
//! All structs derive `Serialize` so the command layer can emit them as JSON.

use greenorbit_model::layer::{Level, Quality};
use greenorbit_model::tone::Tone;
use serde::Serialize;

/// A map point as seen on one layer.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MapPoint {
    pub id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    /// Reading on the selected layer.
    pub value: f64,
    pub level: Level,
    /// Colour-scale band, e.g. `temperature-hot`.
    pub band: String,
}

/// A (time, value) sample of the 24h trend chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimeValue {
    /// "HH:MM"
    pub time: String,
    pub value: f64,
}

/// One bar of the weekly overview.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DayValue {
    pub day: String,
    pub value: f64,
}

/// Current and post-simulation readings for one district.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DistrictComparison {
    pub district: String,
    pub current: f64,
    pub simulated: f64,
}

impl DistrictComparison {
    /// Drop from current to simulated, as a percentage of current.
    pub fn reduction_percent(&self) -> f64 {
        if self.current == 0.0 {
            return 0.0;
        }
        (self.current - self.simulated) / self.current * 100.0
    }
}

/// One slice of the city-wide distribution chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DistributionSlice {
    pub quality: Quality,
    /// Share in percent.
    pub value: f64,
    pub tone: Tone,
}
