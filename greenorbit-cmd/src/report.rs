//! Dashboard report commands over the embedded datasets.

use anyhow::anyhow;
use greenorbit_db::Database;
use greenorbit_model::issue::{IssueStatus, StageState};
use greenorbit_model::metrics::AreaSummary;
use greenorbit_model::Layer;
use log::info;
use std::io::Write;

/// Timeline dates are shown as e.g. "Jan 15, 2024".
const DISPLAY_DATE: &str = "%b %d, %Y";

pub fn run_map<W: Write>(db: &Database, layer: Layer, out: &mut W) -> anyhow::Result<()> {
    let points = db.query_map_points(layer)?;
    writeln!(out, "{} ({})", layer.label(), layer.unit())?;
    for p in &points {
        writeln!(
            out,
            "  {:<20} ({:>3}, {:>3})  {:>8}  {}",
            p.name,
            p.x,
            p.y,
            layer.format_value(p.value),
            p.band
        )?;
    }
    Ok(())
}

pub fn run_metrics<W: Write>(db: &Database, layer: Layer, out: &mut W) -> anyhow::Result<()> {
    writeln!(out, "{} Overview", layer.label())?;
    if let Some(metric) = db.query_daily_metric(layer)? {
        writeln!(
            out,
            "  Current: {}  24h: {} ({})  Status: {}",
            layer.format_value(metric.current),
            metric.change_text(),
            metric.trend.as_str(),
            metric.status.label()
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Today's Summary")?;
    for metric in db.query_daily_metrics()? {
        writeln!(
            out,
            "  {:<12} {:>8}  {}",
            metric.layer.label(),
            metric.layer.format_value(metric.current),
            metric.status.label()
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Recent Alerts")?;
    for alert in db.query_alerts()? {
        writeln!(
            out,
            "  [{}] {} ({})",
            alert.kind.as_str(),
            alert.message,
            alert.time
        )?;
    }

    let summary = AreaSummary::from_points(&db.query_city_points()?, layer);
    writeln!(out)?;
    writeln!(out, "Areas")?;
    writeln!(
        out,
        "  Good: {}  Moderate: {}  Poor: {}  Monitoring: {}",
        summary.good, summary.moderate, summary.poor, summary.monitoring
    )?;
    writeln!(out, "  Active issues: {}", db.count_open_issues()?)?;
    Ok(())
}

pub fn run_trend<W: Write>(db: &Database, layer: Layer, out: &mut W) -> anyhow::Result<()> {
    let samples = db.query_hourly_trend(layer)?;
    writeln!(out, "24h Trend: {} [{}]", layer.chart_label(), layer.chart_color())?;
    for s in &samples {
        writeln!(out, "  {}  {:>6}", s.time, s.value)?;
    }
    Ok(())
}

pub fn run_overview<W: Write>(db: &Database, out: &mut W) -> anyhow::Result<()> {
    writeln!(out, "Weekly Overview")?;
    for d in db.query_weekly_overview()? {
        writeln!(out, "  {}  {:>5}", d.day, d.value)?;
    }

    writeln!(out)?;
    writeln!(out, "District Comparison (current / simulated)")?;
    for d in db.query_district_comparison()? {
        writeln!(
            out,
            "  {:<12} {:>5} / {:>5}  -{:.1}%",
            d.district,
            d.current,
            d.simulated,
            d.reduction_percent()
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Distribution")?;
    for s in db.query_distribution()? {
        writeln!(
            out,
            "  {:<9} {:>3}%  {}",
            s.quality.label(),
            s.value,
            s.tone.as_str()
        )?;
    }
    Ok(())
}

pub fn run_issues<W: Write>(
    db: &Database,
    status: Option<IssueStatus>,
    out: &mut W,
) -> anyhow::Result<()> {
    let issues = db.query_issues(status)?;
    info!("Listing {} issues", issues.len());
    for issue in &issues {
        writeln!(
            out,
            "#{:<3} {:<34} {:<9} {:<14} {:>3}%  {}",
            issue.id,
            issue.title,
            issue.severity,
            issue.status,
            issue.progress(),
            issue.location
        )?;
    }
    Ok(())
}

pub fn run_issue<W: Write>(db: &Database, id: &str, out: &mut W) -> anyhow::Result<()> {
    let issue = db
        .query_issue(id)?
        .ok_or_else(|| anyhow!("Issue {} not found", id))?;

    writeln!(out, "{}", issue.title)?;
    writeln!(
        out,
        "  Severity: {} ({})  Status: {} ({})",
        issue.severity,
        issue.severity.tone().as_str(),
        issue.status,
        issue.status.tone().as_str()
    )?;
    writeln!(out, "  Type: {}", issue.kind.label())?;
    writeln!(out, "  Location: {}", issue.location)?;
    writeln!(out, "  Reported: {}", issue.reported_date.format(DISPLAY_DATE))?;
    writeln!(out, "  Affected area: {}", issue.affected_area)?;
    writeln!(out, "  Resolution progress: {}%", issue.progress())?;
    writeln!(out)?;
    writeln!(out, "{}", issue.description)?;
    writeln!(out)?;
    writeln!(out, "Investigation Timeline")?;
    for stage in issue.timeline() {
        let marker = match stage.state {
            StageState::Completed => "x",
            StageState::Current => ">",
            StageState::Pending => " ",
        };
        writeln!(
            out,
            "  [{}] {}  {}",
            marker,
            stage.date.format(DISPLAY_DATE),
            stage.event
        )?;
    }
    Ok(())
}
