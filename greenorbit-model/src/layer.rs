//! Environmental map layers.
//!
//! Everything the dashboard looks up per layer (labels, units, chart colours,
//! banding thresholds) is an exhaustive `match` on [`Layer`].

use crate::error::ModelError;
use crate::tone::Tone;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four environmental overlays.
#[derive(
    Debug, Default, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    #[default]
    Temperature,
    Pollution,
    Greenery,
    Flood,
}

/// Reading band of a map point on the active layer.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Moderate,
    High,
}

/// Whether a reading is good or bad for the city, independent of direction.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Good,
    Moderate,
    Poor,
}

impl Quality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Good => "good",
            Quality::Moderate => "moderate",
            Quality::Poor => "poor",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Quality::Good => Tone::Success,
            Quality::Moderate => Tone::Warning,
            Quality::Poor => Tone::Destructive,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Quality::Good => "Good",
            Quality::Moderate => "Moderate",
            Quality::Poor => "Poor",
        }
    }
}

impl FromStr for Quality {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "good" => Ok(Quality::Good),
            "moderate" => Ok(Quality::Moderate),
            "poor" => Ok(Quality::Poor),
            other => Err(ModelError::InvalidMetric(other.to_string())),
        }
    }
}

impl Layer {
    pub const ALL: [Layer; 4] = [
        Layer::Temperature,
        Layer::Pollution,
        Layer::Greenery,
        Layer::Flood,
    ];

    /// Lowercase identifier used in fixtures and on the command line.
    pub fn id(&self) -> &'static str {
        match self {
            Layer::Temperature => "temperature",
            Layer::Pollution => "pollution",
            Layer::Greenery => "greenery",
            Layer::Flood => "flood",
        }
    }

    /// Button label in the layer picker.
    pub fn label(&self) -> &'static str {
        match self {
            Layer::Temperature => "Temperature",
            Layer::Pollution => "Air Quality",
            Layer::Greenery => "Greenery",
            Layer::Flood => "Flood Risk",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Layer::Temperature => "°C",
            Layer::Pollution => "AQI",
            Layer::Greenery => "%",
            Layer::Flood => "% Risk",
        }
    }

    /// Y-axis label for the trend charts.
    pub fn chart_label(&self) -> &'static str {
        match self {
            Layer::Temperature => "Temperature (°C)",
            Layer::Pollution => "Air Quality Index",
            Layer::Greenery => "Green Coverage (%)",
            Layer::Flood => "Flood Risk (%)",
        }
    }

    /// Stroke/fill colour for the trend charts.
    pub fn chart_color(&self) -> &'static str {
        match self {
            Layer::Temperature => "#ef4444",
            Layer::Pollution => "#f97316",
            Layer::Greenery => "#22c55e",
            Layer::Flood => "#3b82f6",
        }
    }

    /// `(high_above, moderate_above)` thresholds; both bounds are exclusive.
    pub fn thresholds(&self) -> (f64, f64) {
        match self {
            Layer::Temperature => (30.0, 25.0),
            Layer::Pollution => (70.0, 40.0),
            Layer::Greenery => (70.0, 40.0),
            Layer::Flood => (50.0, 30.0),
        }
    }

    pub fn classify(&self, value: f64) -> Level {
        let (high, moderate) = self.thresholds();
        if value > high {
            Level::High
        } else if value > moderate {
            Level::Moderate
        } else {
            Level::Low
        }
    }

    /// Name of the band as used in the map's colour scale, e.g. `temperature-hot`.
    pub fn band_name(&self, level: Level) -> String {
        let band = match (self, level) {
            (Layer::Temperature, Level::High) => "hot",
            (Layer::Temperature, Level::Moderate) => "moderate",
            (Layer::Temperature, Level::Low) => "cool",
            (_, Level::High) => "high",
            (_, Level::Moderate) => "moderate",
            (_, Level::Low) => "low",
        };
        format!("{}-{}", self.id(), band)
    }

    /// More greenery is good; more of anything else is bad.
    pub fn quality(&self, level: Level) -> Quality {
        match (self, level) {
            (_, Level::Moderate) => Quality::Moderate,
            (Layer::Greenery, Level::High) => Quality::Good,
            (Layer::Greenery, Level::Low) => Quality::Poor,
            (_, Level::Low) => Quality::Good,
            (_, Level::High) => Quality::Poor,
        }
    }

    /// Format a reading with this layer's unit, e.g. `28°C` or `85AQI`.
    pub fn format_value(&self, value: f64) -> String {
        format!("{}{}", value, self.unit())
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.id())
    }
}

impl FromStr for Layer {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "temperature" => Ok(Layer::Temperature),
            "pollution" => Ok(Layer::Pollution),
            "greenery" => Ok(Layer::Greenery),
            "flood" => Ok(Layer::Flood),
            _ => Err(ModelError::UnknownLayer(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_thresholds_are_exclusive() {
        assert_eq!(Layer::Temperature.classify(30.0), Level::Moderate);
        assert_eq!(Layer::Temperature.classify(30.5), Level::High);
        assert_eq!(Layer::Temperature.classify(25.0), Level::Low);
        assert_eq!(Layer::Pollution.classify(95.0), Level::High);
        assert_eq!(Layer::Pollution.classify(45.0), Level::Moderate);
        assert_eq!(Layer::Greenery.classify(40.0), Level::Low);
        assert_eq!(Layer::Flood.classify(70.0), Level::High);
        assert_eq!(Layer::Flood.classify(31.0), Level::Moderate);
    }

    #[test]
    fn test_band_names() {
        assert_eq!(Layer::Temperature.band_name(Level::High), "temperature-hot");
        assert_eq!(Layer::Temperature.band_name(Level::Low), "temperature-cool");
        assert_eq!(Layer::Flood.band_name(Level::Moderate), "flood-moderate");
        assert_eq!(Layer::Greenery.band_name(Level::Low), "greenery-low");
    }

    #[test]
    fn test_quality_direction() {
        assert_eq!(Layer::Greenery.quality(Level::High), Quality::Good);
        assert_eq!(Layer::Pollution.quality(Level::High), Quality::Poor);
        assert_eq!(Layer::Flood.quality(Level::Low), Quality::Good);
        assert_eq!(Layer::Temperature.quality(Level::Moderate), Quality::Moderate);
        assert_eq!(Quality::Poor.tone(), Tone::Destructive);
    }

    #[test]
    fn test_parse_and_display_round_trip_ids() {
        for layer in Layer::ALL {
            assert_eq!(layer.id().parse::<Layer>().unwrap(), layer);
        }
        assert_eq!("Flood".parse::<Layer>().unwrap(), Layer::Flood);
        assert!(matches!(
            "noise".parse::<Layer>(),
            Err(ModelError::UnknownLayer(_))
        ));
    }

    #[test]
    fn test_units_and_labels() {
        assert_eq!(Layer::Pollution.label(), "Air Quality");
        assert_eq!(Layer::Flood.unit(), "% Risk");
        assert_eq!(Layer::Greenery.chart_label(), "Green Coverage (%)");
        assert_eq!(Layer::Temperature.format_value(28.0), "28°C");
        assert_eq!(Layer::default(), Layer::Temperature);
    }
}
