use crate::error::{ModelError, Result};
use crate::layer::{Layer, Level, Quality};
use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};

/// Embedded CSV data for the city monitoring points shown on the map.
pub static CITY_POINTS_CSV: &str = include_str!("../../fixtures/city_points.csv");

/// Latest readings of a monitoring point, one per layer.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Readings {
    /// Degrees Celsius
    pub temperature: f64,
    /// Air quality index
    pub pollution: f64,
    /// Green coverage percentage
    pub greenery: f64,
    /// Flood risk percentage
    pub flood: f64,
}

impl Readings {
    pub fn get(&self, layer: Layer) -> f64 {
        match layer {
            Layer::Temperature => self.temperature,
            Layer::Pollution => self.pollution,
            Layer::Greenery => self.greenery,
            Layer::Flood => self.flood,
        }
    }
}

/// A monitoring point placed on the city map.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct CityPoint {
    pub id: String,
    pub name: String,
    /// Horizontal position as a percentage of map width
    pub x: f64,
    /// Vertical position as a percentage of map height
    pub y: f64,
    pub readings: Readings,
}

fn parse_f64(record: &StringRecord, idx: usize, column: &str) -> Result<f64> {
    record
        .get(idx)
        .map(str::trim)
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| ModelError::InvalidFormat(format!("{column} is not numeric")))
}

impl CityPoint {
    /// Reading on the given layer.
    pub fn value(&self, layer: Layer) -> f64 {
        self.readings.get(layer)
    }

    pub fn level(&self, layer: Layer) -> Level {
        layer.classify(self.value(layer))
    }

    pub fn quality(&self, layer: Layer) -> Quality {
        layer.quality(self.level(layer))
    }

    /// Get the points from the embedded fixture.
    pub fn get_city_points() -> Result<Vec<CityPoint>> {
        CityPoint::parse_city_point_csv(CITY_POINTS_CSV)
    }

    /// Parse a CSV string of monitoring points.
    ///
    /// Expected CSV columns: id, name, x, y, temperature, pollution, greenery, flood
    pub fn parse_city_point_csv(csv_object: &str) -> Result<Vec<CityPoint>> {
        let mut points: Vec<CityPoint> = Vec::new();
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .from_reader(csv_object.as_bytes());
        for row in rdr.records() {
            let record = row?;
            let id = record.get(0).unwrap_or("").trim().to_string();
            if id.is_empty() {
                return Err(ModelError::InvalidFormat("point without id".to_string()));
            }
            let point = CityPoint {
                id,
                name: record.get(1).unwrap_or("").trim().to_string(),
                x: parse_f64(&record, 2, "x")?,
                y: parse_f64(&record, 3, "y")?,
                readings: Readings {
                    temperature: parse_f64(&record, 4, "temperature")?,
                    pollution: parse_f64(&record, 5, "pollution")?,
                    greenery: parse_f64(&record, 6, "greenery")?,
                    flood: parse_f64(&record, 7, "flood")?,
                },
            };
            points.push(point);
        }
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_points() {
        let points = CityPoint::get_city_points().unwrap();
        assert_eq!(points.len(), 5);
        assert_eq!(points[1].name, "Industrial Zone");
        assert_eq!(points[1].value(Layer::Pollution), 95.0);
        assert_eq!(points[1].level(Layer::Temperature), Level::High);
        assert_eq!(points[3].quality(Layer::Greenery), Quality::Good);
    }

    #[test]
    fn test_parse_city_point_csv() {
        let csv_data = "\
id,name,x,y,temperature,pollution,greenery,flood
7,Harbour,12.5,80,27,50,30,65
";
        let points = CityPoint::parse_city_point_csv(csv_data).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].id, "7");
        assert!((points[0].x - 12.5).abs() < f64::EPSILON);
        assert_eq!(points[0].level(Layer::Flood), Level::High);
        assert_eq!(points[0].level(Layer::Pollution), Level::Moderate);
    }

    #[test]
    fn test_parse_rejects_non_numeric_reading() {
        let csv_data = "\
id,name,x,y,temperature,pollution,greenery,flood
7,Harbour,12.5,80,warm,50,30,65
";
        assert!(matches!(
            CityPoint::parse_city_point_csv(csv_data),
            Err(ModelError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_empty_csv() {
        let csv_data = "id,name,x,y,temperature,pollution,greenery,flood\n";
        assert!(CityPoint::parse_city_point_csv(csv_data).unwrap().is_empty());
    }
}
