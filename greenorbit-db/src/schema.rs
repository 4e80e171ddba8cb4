//! SQL schema definitions for the in-memory SQLite database.
//!
//! The schema is applied as a single batch when the database is initialized.

/// Returns the full SQL schema as a single batch string.
///
/// **Map and sidebar tables:**
/// - `city_points` - Monitoring points with one reading column per layer
/// - `daily_metrics` - Today's city average per layer
/// - `alerts` - Recent alerts feed
///
/// **Chart tables:**
/// - `hourly_trend` - 24h samples, one reading column per layer
/// - `weekly_overview` - One value per weekday
/// - `districts` - Current vs simulated district readings
/// - `distribution` - City-wide good/moderate/poor shares
///
/// **Issue tables:**
/// - `issues` - Reported environmental issues
///
/// Layer readings are stored as columns named after `Layer::id()`, so the
/// active layer selects a column rather than filtering rows.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS city_points (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        x REAL NOT NULL,
        y REAL NOT NULL,
        temperature REAL NOT NULL,
        pollution REAL NOT NULL,
        greenery REAL NOT NULL,
        flood REAL NOT NULL
    );

    CREATE TABLE IF NOT EXISTS daily_metrics (
        layer TEXT PRIMARY KEY,
        current REAL NOT NULL,
        change REAL NOT NULL,
        trend TEXT NOT NULL,
        status TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS alerts (
        id INTEGER PRIMARY KEY,
        kind TEXT NOT NULL,
        message TEXT NOT NULL,
        time TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS hourly_trend (
        time TEXT PRIMARY KEY,
        temperature REAL NOT NULL,
        pollution REAL NOT NULL,
        greenery REAL NOT NULL,
        flood REAL NOT NULL
    );

    CREATE TABLE IF NOT EXISTS weekly_overview (
        position INTEGER PRIMARY KEY,
        day TEXT NOT NULL,
        value REAL NOT NULL
    );

    CREATE TABLE IF NOT EXISTS districts (
        position INTEGER PRIMARY KEY,
        district TEXT NOT NULL UNIQUE,
        current REAL NOT NULL,
        simulated REAL NOT NULL
    );

    CREATE TABLE IF NOT EXISTS distribution (
        name TEXT PRIMARY KEY,
        value REAL NOT NULL
    );

    CREATE TABLE IF NOT EXISTS issues (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        kind TEXT NOT NULL,
        severity TEXT NOT NULL,
        location TEXT NOT NULL,
        reported_date TEXT NOT NULL,
        description TEXT NOT NULL,
        affected_area TEXT NOT NULL,
        status TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_issues_status ON issues(status);
    "#
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn schema_is_valid_sql() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema())
            .expect("Schema SQL should be valid");
    }

    #[test]
    fn schema_creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();

        let expected_tables = [
            "city_points",
            "daily_metrics",
            "alerts",
            "hourly_trend",
            "weekly_overview",
            "districts",
            "distribution",
            "issues",
        ];

        for table in &expected_tables {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "Table '{}' should exist", table);
        }
    }

    #[test]
    fn schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();
        conn.execute_batch(create_schema())
            .expect("Applying schema twice should succeed due to IF NOT EXISTS");
    }
}
