//! Sidebar metrics: daily per-layer readings, recent alerts and area counts.

use crate::city_point::CityPoint;
use crate::error::{ModelError, Result};
use crate::layer::{Layer, Quality};
use crate::tone::Tone;
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Embedded CSV data for today's city-wide metrics.
pub static DAILY_METRICS_CSV: &str = include_str!("../../fixtures/daily_metrics.csv");

/// Embedded CSV data for the recent alerts feed.
pub static ALERTS_CSV: &str = include_str!("../../fixtures/alerts.csv");

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
        }
    }
}

impl FromStr for Trend {
    type Err = ModelError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(Trend::Up),
            "down" => Ok(Trend::Down),
            other => Err(ModelError::InvalidMetric(other.to_string())),
        }
    }
}

/// City average for one layer with its 24h movement.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct DailyMetric {
    pub layer: Layer,
    pub current: f64,
    /// Change over the last 24 hours, in the layer's unit
    pub change: f64,
    pub trend: Trend,
    pub status: Quality,
}

impl DailyMetric {
    /// Signed 24h change with unit, e.g. `+8AQI` or `-2°C`.
    pub fn change_text(&self) -> String {
        let sign = if self.change > 0.0 { "+" } else { "" };
        format!("{}{}", sign, self.layer.format_value(self.change))
    }

    /// Rises are flagged; anything else is shown neutrally.
    pub fn change_tone(&self) -> Tone {
        if self.change > 0.0 {
            Tone::Destructive
        } else {
            Tone::Secondary
        }
    }

    pub fn get_daily_metrics() -> Result<Vec<DailyMetric>> {
        DailyMetric::parse_daily_metric_csv(DAILY_METRICS_CSV)
    }

    /// Expected CSV columns: layer, current, change, trend, status
    pub fn parse_daily_metric_csv(csv_object: &str) -> Result<Vec<DailyMetric>> {
        let mut metrics = Vec::new();
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(csv_object.as_bytes());
        for row in rdr.records() {
            let record = row?;
            let field = |idx: usize| record.get(idx).unwrap_or("").trim();
            let number = |idx: usize, column: &str| {
                field(idx)
                    .parse::<f64>()
                    .map_err(|_| ModelError::InvalidFormat(format!("{column} is not numeric")))
            };
            metrics.push(DailyMetric {
                layer: field(0).parse()?,
                current: number(1, "current")?,
                change: number(2, "change")?,
                trend: field(3).parse()?,
                status: field(4).parse()?,
            });
        }
        Ok(metrics)
    }

    /// Find the metric for a layer in a parsed list.
    pub fn for_layer(metrics: &[DailyMetric], layer: Layer) -> Option<&DailyMetric> {
        metrics.iter().find(|m| m.layer == layer)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Warning,
    Success,
    Info,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Warning => "warning",
            AlertKind::Success => "success",
            AlertKind::Info => "info",
        }
    }
}

impl FromStr for AlertKind {
    type Err = ModelError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "warning" => Ok(AlertKind::Warning),
            "success" => Ok(AlertKind::Success),
            "info" => Ok(AlertKind::Info),
            _ => Err(ModelError::UnknownAlertKind(s.to_string())),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: u32,
    pub kind: AlertKind,
    pub message: String,
    /// Relative age as displayed, e.g. "2 hours ago"
    pub time: String,
}

impl Alert {
    pub fn get_alerts() -> Result<Vec<Alert>> {
        Alert::parse_alert_csv(ALERTS_CSV)
    }

    /// Expected CSV columns: id, kind, message, time
    pub fn parse_alert_csv(csv_object: &str) -> Result<Vec<Alert>> {
        let mut alerts = Vec::new();
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(csv_object.as_bytes());
        for row in rdr.records() {
            let record = row?;
            let field = |idx: usize| record.get(idx).unwrap_or("").trim();
            alerts.push(Alert {
                id: field(0)
                    .parse()
                    .map_err(|_| ModelError::InvalidFormat("alert id".to_string()))?,
                kind: field(1).parse()?,
                message: field(2).to_string(),
                time: field(3).to_string(),
            });
        }
        Ok(alerts)
    }
}

/// How many monitored areas fall into each quality band on one layer.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub struct AreaSummary {
    pub good: usize,
    pub moderate: usize,
    pub poor: usize,
    pub monitoring: usize,
}

impl AreaSummary {
    pub fn from_points(points: &[CityPoint], layer: Layer) -> Self {
        points.iter().fold(
            AreaSummary {
                good: 0,
                moderate: 0,
                poor: 0,
                monitoring: points.len(),
            },
            |mut acc, point| {
                match point.quality(layer) {
                    Quality::Good => acc.good += 1,
                    Quality::Moderate => acc.moderate += 1,
                    Quality::Poor => acc.poor += 1,
                }
                acc
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_daily_metrics() {
        let metrics = DailyMetric::get_daily_metrics().unwrap();
        assert_eq!(metrics.len(), 4);
        let pollution = DailyMetric::for_layer(&metrics, Layer::Pollution).unwrap();
        assert_eq!(pollution.current, 65.0);
        assert_eq!(pollution.trend, Trend::Up);
        assert_eq!(pollution.status, Quality::Moderate);
        assert_eq!(pollution.change_text(), "+8AQI");
        assert_eq!(pollution.change_tone(), Tone::Destructive);

        let temperature = DailyMetric::for_layer(&metrics, Layer::Temperature).unwrap();
        assert_eq!(temperature.change_text(), "-2°C");
        assert_eq!(temperature.change_tone(), Tone::Secondary);
    }

    #[test]
    fn test_embedded_alerts() {
        let alerts = Alert::get_alerts().unwrap();
        assert_eq!(alerts.len(), 3);
        assert_eq!(alerts[0].kind, AlertKind::Warning);
        assert_eq!(alerts[2].time, "1 day ago");
    }

    #[test]
    fn test_parse_daily_metric_rejects_bad_trend() {
        let csv_data = "layer,current,change,trend,status\nflood,25,-5,sideways,good\n";
        assert!(matches!(
            DailyMetric::parse_daily_metric_csv(csv_data),
            Err(ModelError::InvalidMetric(_))
        ));
    }

    #[test]
    fn test_area_summary_for_pollution() {
        let points = CityPoint::get_city_points().unwrap();
        // 85, 95 high; 45 moderate; 25, 35 low
        let summary = AreaSummary::from_points(&points, Layer::Pollution);
        assert_eq!(summary.poor, 2);
        assert_eq!(summary.moderate, 1);
        assert_eq!(summary.good, 2);
        assert_eq!(summary.monitoring, 5);
    }

    #[test]
    fn test_area_summary_for_greenery() {
        let points = CityPoint::get_city_points().unwrap();
        // 15, 5 low; 70, 60 moderate; 95 high
        let summary = AreaSummary::from_points(&points, Layer::Greenery);
        assert_eq!(summary.good, 1);
        assert_eq!(summary.moderate, 2);
        assert_eq!(summary.poor, 2);
    }
}
