//! Typed query methods for the dashboard views.
//!
//! Per-layer readings live in columns named after `Layer::id()`. The column
//! name is interpolated from the enum, never from user input.

use crate::models::{DayValue, DistributionSlice, DistrictComparison, MapPoint, TimeValue};
use crate::Database;
use anyhow::Context;
use chrono::NaiveDate;
use greenorbit_model::city_point::{CityPoint, Readings};
use greenorbit_model::issue::{Issue, IssueStatus, DATE_FORMAT};
use greenorbit_model::layer::{Layer, Quality};
use greenorbit_model::metrics::{Alert, DailyMetric};
use rusqlite::{params, Row};

type IssueRow = (String, String, String, String, String, String, String, String, String);

fn issue_row(row: &Row<'_>) -> rusqlite::Result<IssueRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
    ))
}

fn issue_from_row(row: IssueRow) -> anyhow::Result<Issue> {
    let (id, title, kind, severity, location, reported_date, description, affected_area, status) =
        row;
    Ok(Issue {
        reported_date: NaiveDate::parse_from_str(&reported_date, DATE_FORMAT)
            .with_context(|| format!("issue {id} has bad date {reported_date}"))?,
        kind: kind.parse()?,
        severity: severity.parse()?,
        status: status.parse()?,
        id,
        title,
        location,
        description,
        affected_area,
    })
}

const ISSUE_COLUMNS: &str =
    "id, title, kind, severity, location, reported_date, description, affected_area, status";

impl Database {
    // ───────────────────── Map ─────────────────────

    /// Monitoring points with their reading and band on `layer`, ordered by id.
    pub fn query_map_points(&self, layer: Layer) -> anyhow::Result<Vec<MapPoint>> {
        let conn = self.conn.borrow();
        let sql = format!(
            "SELECT id, name, x, y, {} FROM city_points ORDER BY id",
            layer.id()
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                let value: f64 = row.get(4)?;
                let level = layer.classify(value);
                Ok(MapPoint {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    x: row.get(2)?,
                    y: row.get(3)?,
                    value,
                    level,
                    band: layer.band_name(level),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "query: query_map_points({}) returned {} records",
            layer,
            rows.len()
        );
        Ok(rows)
    }

    /// Full monitoring points with all four readings, ordered by id.
    pub fn query_city_points(&self) -> anyhow::Result<Vec<CityPoint>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT id, name, x, y, temperature, pollution, greenery, flood
             FROM city_points ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(CityPoint {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    x: row.get(2)?,
                    y: row.get(3)?,
                    readings: Readings {
                        temperature: row.get(4)?,
                        pollution: row.get(5)?,
                        greenery: row.get(6)?,
                        flood: row.get(7)?,
                    },
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    // ───────────────────── Sidebar ─────────────────────

    /// Today's metrics in layer order.
    pub fn query_daily_metrics(&self) -> anyhow::Result<Vec<DailyMetric>> {
        let conn = self.conn.borrow();
        let mut stmt =
            conn.prepare("SELECT layer, current, change, trend, status FROM daily_metrics")?;
        let raw = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, f64>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        let mut metrics = raw
            .into_iter()
            .map(|(layer, current, change, trend, status)| -> anyhow::Result<DailyMetric> {
                Ok(DailyMetric {
                    layer: layer.parse()?,
                    current,
                    change,
                    trend: trend.parse()?,
                    status: status.parse()?,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        metrics.sort_by_key(|m| m.layer);
        Ok(metrics)
    }

    /// Today's metric for one layer, if loaded.
    pub fn query_daily_metric(&self, layer: Layer) -> anyhow::Result<Option<DailyMetric>> {
        Ok(self
            .query_daily_metrics()?
            .into_iter()
            .find(|m| m.layer == layer))
    }

    /// Alerts, newest first (fixture order).
    pub fn query_alerts(&self) -> anyhow::Result<Vec<Alert>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare("SELECT id, kind, message, time FROM alerts ORDER BY id")?;
        let raw = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, u32>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        raw.into_iter()
            .map(|(id, kind, message, time)| -> anyhow::Result<Alert> {
                Ok(Alert {
                    id,
                    kind: kind.parse()?,
                    message,
                    time,
                })
            })
            .collect()
    }

    // ───────────────────── Charts ─────────────────────

    /// 24h trend of `layer`, ordered by time of day.
    pub fn query_hourly_trend(&self, layer: Layer) -> anyhow::Result<Vec<TimeValue>> {
        let conn = self.conn.borrow();
        let sql = format!(
            "SELECT time, {} FROM hourly_trend ORDER BY time",
            layer.id()
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(TimeValue {
                    time: row.get(0)?,
                    value: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "query: query_hourly_trend({}) returned {} records",
            layer,
            rows.len()
        );
        Ok(rows)
    }

    pub fn query_weekly_overview(&self) -> anyhow::Result<Vec<DayValue>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare("SELECT day, value FROM weekly_overview ORDER BY position")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(DayValue {
                    day: row.get(0)?,
                    value: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn query_district_comparison(&self) -> anyhow::Result<Vec<DistrictComparison>> {
        let conn = self.conn.borrow();
        let mut stmt = conn
            .prepare("SELECT district, current, simulated FROM districts ORDER BY position")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(DistrictComparison {
                    district: row.get(0)?,
                    current: row.get(1)?,
                    simulated: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Distribution slices ordered good, moderate, poor.
    pub fn query_distribution(&self) -> anyhow::Result<Vec<DistributionSlice>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare("SELECT name, value FROM distribution")?;
        let raw = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        let mut slices = raw
            .into_iter()
            .map(|(name, value)| -> anyhow::Result<DistributionSlice> {
                let quality: Quality = name.parse()?;
                Ok(DistributionSlice {
                    quality,
                    value,
                    tone: quality.tone(),
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        slices.sort_by_key(|s| s.quality);
        Ok(slices)
    }

    // ───────────────────── Issues ─────────────────────

    /// Issues ordered by id, optionally restricted to one status.
    pub fn query_issues(&self, status: Option<IssueStatus>) -> anyhow::Result<Vec<Issue>> {
        let conn = self.conn.borrow();
        let raw = match status {
            Some(status) => {
                let sql = format!(
                    "SELECT {ISSUE_COLUMNS} FROM issues WHERE status = ?1 ORDER BY CAST(id AS INTEGER), id"
                );
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt
                    .query_map(params![status.as_str()], issue_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            }
            None => {
                let sql = format!(
                    "SELECT {ISSUE_COLUMNS} FROM issues ORDER BY CAST(id AS INTEGER), id"
                );
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt
                    .query_map([], issue_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            }
        };
        let issues = raw
            .into_iter()
            .map(issue_from_row)
            .collect::<anyhow::Result<Vec<_>>>()?;
        log::info!("query: query_issues returned {} records", issues.len());
        Ok(issues)
    }

    pub fn query_issue(&self, id: &str) -> anyhow::Result<Option<Issue>> {
        let conn = self.conn.borrow();
        let sql = format!("SELECT {ISSUE_COLUMNS} FROM issues WHERE id = ?1");
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt
            .query_map(params![id], issue_row)?
            .collect::<Result<Vec<_>, _>>()?;
        match rows.pop() {
            Some(row) => Ok(Some(issue_from_row(row)?)),
            None => Ok(None),
        }
    }

    /// Number of issues with status open.
    pub fn count_open_issues(&self) -> anyhow::Result<usize> {
        let conn = self.conn.borrow();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM issues WHERE status = ?1",
            params![IssueStatus::Open.as_str()],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}
