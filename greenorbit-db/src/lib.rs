//! In-memory SQLite database for the GreenOrbit dashboard datasets.
//!
//! The dashboard has no backend: every dataset is a CSV fixture embedded at
//! compile time. This crate loads those fixtures into an in-memory SQLite
//! database and exposes typed queries for the map, sidebar, charts and
//! issue views.
//!
//! - `Rc<RefCell<Connection>>` wrapper for interior mutability in a single thread
//! - Typed query methods returning serializable structs from [`models`]
//! - Layer-specific columns are selected through `greenorbit_model::Layer`
//!
//! # Usage
//!
//! ```rust
//! use greenorbit_db::Database;
//! use greenorbit_model::Layer;
//!
//! let db = Database::with_fixtures().unwrap();
//! let points = db.query_map_points(Layer::Pollution).unwrap();
//! assert_eq!(points.len(), 5);
//! ```

pub mod schema;
mod loader;
mod queries;
pub mod models;

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// Embedded 24h trend samples.
pub static HOURLY_TREND_CSV: &str = include_str!("../../fixtures/hourly_trend.csv");
/// Embedded weekly overview values.
pub static WEEKLY_OVERVIEW_CSV: &str = include_str!("../../fixtures/weekly_overview.csv");
/// Embedded district comparison rows.
pub static DISTRICTS_CSV: &str = include_str!("../../fixtures/districts.csv");
/// Embedded city-wide distribution shares.
pub static DISTRIBUTION_CSV: &str = include_str!("../../fixtures/distribution.csv");

/// In-memory SQLite database holding the dashboard datasets.
///
/// Cheaply cloneable (via `Rc`); clones share the same connection.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    ///
    /// The database is empty after creation; use the `load_*` methods
    /// to populate it with CSV data.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }

    /// Create a database populated with every embedded fixture.
    pub fn with_fixtures() -> anyhow::Result<Self> {
        use greenorbit_model::{city_point, issue, metrics};

        let db = Self::new()?;
        db.load_city_points(city_point::CITY_POINTS_CSV)?;
        db.load_daily_metrics(metrics::DAILY_METRICS_CSV)?;
        db.load_alerts(metrics::ALERTS_CSV)?;
        db.load_issues(issue::ISSUES_CSV)?;
        db.load_hourly_trend(HOURLY_TREND_CSV)?;
        db.load_weekly_overview(WEEKLY_OVERVIEW_CSV)?;
        db.load_districts(DISTRICTS_CSV)?;
        db.load_distribution(DISTRIBUTION_CSV)?;
        Ok(db)
    }
}
