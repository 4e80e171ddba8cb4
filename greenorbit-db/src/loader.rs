//! CSV data loading functions for populating the in-memory SQLite database.
//!
//! Datasets that have a model type are parsed through `greenorbit_model`
//! first, so malformed rows fail with a typed error before anything is
//! inserted. Chart-only datasets are read straight from the CSV.
//!
//! # CSV Formats (all with headers)
//!
//! - **City points**: `id,name,x,y,temperature,pollution,greenery,flood`
//! - **Daily metrics**: `layer,current,change,trend,status`
//! - **Alerts**: `id,kind,message,time`
//! - **Issues**: `id,title,type,severity,location,reported_date,description,affected_area,status`
//! - **Hourly trend**: `time,temperature,pollution,greenery,flood`
//! - **Weekly overview**: `day,value`
//! - **Districts**: `district,current,simulated`
//! - **Distribution**: `name,value`

use crate::Database;
use greenorbit_model::city_point::CityPoint;
use greenorbit_model::issue::{Issue, DATE_FORMAT};
use greenorbit_model::metrics::{Alert, DailyMetric};
use rusqlite::params;

fn reader(csv_data: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes())
}

impl Database {
    /// Load monitoring points from CSV string.
    pub fn load_city_points(&self, csv_data: &str) -> anyhow::Result<()> {
        let points = CityPoint::parse_city_point_csv(csv_data)?;
        let conn = self.conn.borrow();
        for p in &points {
            let r = &p.readings;
            conn.execute(
                "INSERT OR REPLACE INTO city_points
                 (id, name, x, y, temperature, pollution, greenery, flood)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![p.id, p.name, p.x, p.y, r.temperature, r.pollution, r.greenery, r.flood],
            )?;
        }
        log::info!("loader: Loaded {} city points", points.len());
        Ok(())
    }

    /// Load today's per-layer metrics from CSV string.
    pub fn load_daily_metrics(&self, csv_data: &str) -> anyhow::Result<()> {
        let metrics = DailyMetric::parse_daily_metric_csv(csv_data)?;
        let conn = self.conn.borrow();
        for m in &metrics {
            conn.execute(
                "INSERT OR REPLACE INTO daily_metrics (layer, current, change, trend, status)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    m.layer.id(),
                    m.current,
                    m.change,
                    m.trend.as_str(),
                    m.status.as_str(),
                ],
            )?;
        }
        log::info!("loader: Loaded {} daily metrics", metrics.len());
        Ok(())
    }

    /// Load the alerts feed from CSV string.
    pub fn load_alerts(&self, csv_data: &str) -> anyhow::Result<()> {
        let alerts = Alert::parse_alert_csv(csv_data)?;
        let conn = self.conn.borrow();
        for a in &alerts {
            conn.execute(
                "INSERT OR REPLACE INTO alerts (id, kind, message, time)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    a.id,
                    a.kind.as_str(),
                    a.message,
                    a.time
                ],
            )?;
        }
        log::info!("loader: Loaded {} alerts", alerts.len());
        Ok(())
    }

    /// Load reported issues from CSV string.
    ///
    /// # Example CSV
    /// ```text
    /// id,title,type,severity,location,reported_date,description,affected_area,status
    /// 4,Deforestation Alert,greenery,high,Uttara,2024-01-12,"Green cover lost.",1.2 km²,open
    /// ```
    pub fn load_issues(&self, csv_data: &str) -> anyhow::Result<()> {
        let issues = Issue::parse_issue_csv(csv_data)?;
        let conn = self.conn.borrow();
        for i in &issues {
            conn.execute(
                "INSERT OR REPLACE INTO issues
                 (id, title, kind, severity, location, reported_date, description, affected_area, status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    i.id,
                    i.title,
                    i.kind.id(),
                    i.severity.as_str(),
                    i.location,
                    i.reported_date.format(DATE_FORMAT).to_string(),
                    i.description,
                    i.affected_area,
                    i.status.as_str(),
                ],
            )?;
        }
        log::info!("loader: Loaded {} issues", issues.len());
        Ok(())
    }

    /// Load 24h trend samples from CSV string. Rows with a non-numeric reading are skipped.
    pub fn load_hourly_trend(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = reader(csv_data);

        let mut count = 0u32;
        let mut skipped = 0u32;
        for result in rdr.records() {
            let r = result?;
            let time = r.get(0).unwrap_or("").trim();
            let readings: Vec<Option<f64>> = (1..=4)
                .map(|idx| r.get(idx).and_then(|s| s.trim().parse().ok()))
                .collect();
            let (Some(temperature), Some(pollution), Some(greenery), Some(flood)) =
                (readings[0], readings[1], readings[2], readings[3])
            else {
                skipped += 1;
                continue;
            };
            if time.is_empty() {
                skipped += 1;
                continue;
            }

            conn.execute(
                "INSERT OR REPLACE INTO hourly_trend (time, temperature, pollution, greenery, flood)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![time, temperature, pollution, greenery, flood],
            )?;
            count += 1;
        }
        log::info!("loader: Loaded {} trend samples, skipped {} invalid", count, skipped);
        Ok(())
    }

    /// Load the weekly overview from CSV string. File order is kept.
    pub fn load_weekly_overview(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = reader(csv_data);

        let mut count = 0u32;
        for (position, result) in rdr.records().enumerate() {
            let r = result?;
            let day = r.get(0).unwrap_or("").trim();
            let value: f64 = r.get(1).unwrap_or("0").trim().parse()?;
            conn.execute(
                "INSERT OR REPLACE INTO weekly_overview (position, day, value) VALUES (?1, ?2, ?3)",
                params![position as i64, day, value],
            )?;
            count += 1;
        }
        log::info!("loader: Loaded {} weekly values", count);
        Ok(())
    }

    /// Load district comparison rows from CSV string. File order is kept.
    pub fn load_districts(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = reader(csv_data);

        let mut count = 0u32;
        for (position, result) in rdr.records().enumerate() {
            let r = result?;
            let district = r.get(0).unwrap_or("").trim();
            let current: f64 = r.get(1).unwrap_or("0").trim().parse()?;
            let simulated: f64 = r.get(2).unwrap_or("0").trim().parse()?;
            conn.execute(
                "INSERT OR REPLACE INTO districts (position, district, current, simulated)
                 VALUES (?1, ?2, ?3, ?4)",
                params![position as i64, district, current, simulated],
            )?;
            count += 1;
        }
        log::info!("loader: Loaded {} districts", count);
        Ok(())
    }

    /// Load the city-wide distribution from CSV string.
    pub fn load_distribution(&self, csv_data: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut rdr = reader(csv_data);

        let mut count = 0u32;
        for result in rdr.records() {
            let r = result?;
            let name = r.get(0).unwrap_or("").trim();
            let value: f64 = r.get(1).unwrap_or("0").trim().parse()?;
            conn.execute(
                "INSERT OR REPLACE INTO distribution (name, value) VALUES (?1, ?2)",
                params![name, value],
            )?;
            count += 1;
        }
        log::info!("loader: Loaded {} distribution slices", count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Database;

    #[test]
    fn load_city_points_from_csv() {
        let db = Database::new().unwrap();
        let csv = "\
id,name,x,y,temperature,pollution,greenery,flood
1,Downtown District,25,30,28,85,15,20
2,Industrial Zone,60,45,32,95,5,40
";
        db.load_city_points(csv).unwrap();

        let conn = db.conn.borrow();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM city_points", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2);

        let pollution: f64 = conn
            .query_row(
                "SELECT pollution FROM city_points WHERE id = '2'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(pollution, 95.0);
    }

    #[test]
    fn load_issues_replaces_on_conflict() {
        let db = Database::new().unwrap();
        let csv1 = "\
id,title,type,severity,location,reported_date,description,affected_area,status
4,Deforestation Alert,greenery,high,Uttara,2024-01-12,Green cover lost.,1.2 km²,open
";
        let csv2 = "\
id,title,type,severity,location,reported_date,description,affected_area,status
4,Deforestation Alert,greenery,high,Uttara,2024-01-12,Green cover lost.,1.2 km²,resolved
";
        db.load_issues(csv1).unwrap();
        db.load_issues(csv2).unwrap();

        let conn = db.conn.borrow();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM issues", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1, "Should have 1 row after upsert");

        let status: String = conn
            .query_row("SELECT status FROM issues WHERE id = '4'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(status, "resolved");
    }

    #[test]
    fn load_issues_rejects_unknown_layer() {
        let db = Database::new().unwrap();
        let csv = "\
id,title,type,severity,location,reported_date,description,affected_area,status
5,Noise,noise,low,Mirpur,2024-02-01,Loud.,1 km²,open
";
        assert!(db.load_issues(csv).is_err());
    }

    #[test]
    fn load_hourly_trend_skips_non_numeric() {
        let db = Database::new().unwrap();
        let csv = "\
time,temperature,pollution,greenery,flood
00:00,22,45,60,15
04:00,---,40,60,12
";
        db.load_hourly_trend(csv).unwrap();

        let conn = db.conn.borrow();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM hourly_trend", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn load_daily_metrics_stores_lowercase_labels() {
        let db = Database::new().unwrap();
        db.load_daily_metrics("layer,current,change,trend,status\npollution,65,8,up,moderate\n")
            .unwrap();

        let conn = db.conn.borrow();
        let (trend, status): (String, String) = conn
            .query_row(
                "SELECT trend, status FROM daily_metrics WHERE layer = 'pollution'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(trend, "up");
        assert_eq!(status, "moderate");
    }
}
