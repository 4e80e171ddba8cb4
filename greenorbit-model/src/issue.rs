//! Reported environmental issues and their investigation timeline.

use crate::error::{ModelError, Result};
use crate::layer::Layer;
use crate::tone::Tone;
use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Embedded CSV data for the reported issues.
pub static ISSUES_CSV: &str = include_str!("../../fixtures/issues.csv");

/// Date format used by the issues fixture: "YYYY-MM-DD"
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueStatus {
    Open,
    Investigating,
    Resolved,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Severity::Critical | Severity::High => Tone::Destructive,
            Severity::Medium => Tone::Warning,
            Severity::Low => Tone::Secondary,
        }
    }
}

impl FromStr for Severity {
    type Err = ModelError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(ModelError::UnknownSeverity(s.to_string())),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl IssueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::Open => "open",
            IssueStatus::Investigating => "investigating",
            IssueStatus::Resolved => "resolved",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            IssueStatus::Open => Tone::Destructive,
            IssueStatus::Investigating => Tone::Warning,
            IssueStatus::Resolved => Tone::Success,
        }
    }

    /// Resolution progress in percent.
    pub fn progress(&self) -> u8 {
        match self {
            IssueStatus::Open => 20,
            IssueStatus::Investigating => 60,
            IssueStatus::Resolved => 100,
        }
    }
}

impl FromStr for IssueStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(IssueStatus::Open),
            "investigating" => Ok(IssueStatus::Investigating),
            "resolved" => Ok(IssueStatus::Resolved),
            _ => Err(ModelError::UnknownStatus(s.to_string())),
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A reported environmental issue.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub title: String,
    /// The layer this issue concerns
    pub kind: Layer,
    pub severity: Severity,
    pub location: String,
    pub reported_date: NaiveDate,
    pub description: String,
    /// Free-text area, e.g. "2.5 km²"
    pub affected_area: String,
    pub status: IssueStatus,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StageState {
    Completed,
    Current,
    Pending,
}

/// One step of an issue's investigation timeline.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct TimelineStage {
    pub date: NaiveDate,
    pub event: &'static str,
    pub state: StageState,
}

/// Investigation steps with their day offset from the report date.
const TIMELINE_STEPS: [(&str, i64); 5] = [
    ("Issue reported by environmental sensors", 0),
    ("Initial assessment conducted", 0),
    ("Field team dispatched for investigation", 1),
    ("Mitigation plan development", 2),
    ("Implementation and monitoring", 3),
];

impl Issue {
    pub fn is_open(&self) -> bool {
        self.status == IssueStatus::Open
    }

    pub fn progress(&self) -> u8 {
        self.status.progress()
    }

    /// Investigation timeline, with stage states derived from the status.
    pub fn timeline(&self) -> Vec<TimelineStage> {
        let completed = match self.status {
            IssueStatus::Open => 1,
            IssueStatus::Investigating => 2,
            IssueStatus::Resolved => TIMELINE_STEPS.len(),
        };
        TIMELINE_STEPS
            .iter()
            .enumerate()
            .map(|(idx, &(event, offset))| TimelineStage {
                date: self.reported_date + chrono::Duration::days(offset),
                event,
                state: match idx.cmp(&completed) {
                    std::cmp::Ordering::Less => StageState::Completed,
                    std::cmp::Ordering::Equal => StageState::Current,
                    std::cmp::Ordering::Greater => StageState::Pending,
                },
            })
            .collect()
    }

    /// Number of issues still waiting for action.
    pub fn count_open(issues: &[Issue]) -> usize {
        issues.iter().filter(|i| i.is_open()).count()
    }

    /// Get the issues from the embedded fixture.
    pub fn get_issues() -> Result<Vec<Issue>> {
        Issue::parse_issue_csv(ISSUES_CSV)
    }

    /// Parse a CSV string of issues.
    ///
    /// Expected CSV columns: id, title, type, severity, location, reported_date,
    /// description, affected_area, status
    pub fn parse_issue_csv(csv_object: &str) -> Result<Vec<Issue>> {
        let mut issues: Vec<Issue> = Vec::new();
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(csv_object.as_bytes());
        for row in rdr.records() {
            let record = row?;
            let field = |idx: usize| record.get(idx).unwrap_or("").trim().to_string();
            let date_str = field(5);
            let reported_date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT)
                .map_err(|_| ModelError::DateParse(date_str.clone()))?;
            issues.push(Issue {
                id: field(0),
                title: field(1),
                kind: field(2).parse()?,
                severity: field(3).parse()?,
                location: field(4),
                reported_date,
                description: field(6),
                affected_area: field(7),
                status: field(8).parse()?,
            });
        }
        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_embedded_issues() {
        let issues = Issue::get_issues().unwrap();
        assert_eq!(issues.len(), 4);
        assert_eq!(issues[0].title, "High Air Pollution in Old Dhaka");
        assert_eq!(issues[0].kind, Layer::Pollution);
        assert_eq!(issues[0].severity, Severity::Critical);
        assert_eq!(issues[0].status, IssueStatus::Investigating);
        assert_eq!(issues[0].reported_date, date(2024, 1, 15));
        assert_eq!(issues[3].affected_area, "1.2 km²");
        assert_eq!(Issue::count_open(&issues), 2);
    }

    #[test]
    fn test_progress_and_tones() {
        assert_eq!(IssueStatus::Open.progress(), 20);
        assert_eq!(IssueStatus::Investigating.progress(), 60);
        assert_eq!(IssueStatus::Resolved.progress(), 100);
        assert_eq!(Severity::Critical.tone(), Tone::Destructive);
        assert_eq!(Severity::High.tone(), Tone::Destructive);
        assert_eq!(Severity::Medium.tone(), Tone::Warning);
        assert_eq!(Severity::Low.tone(), Tone::Secondary);
        assert_eq!(IssueStatus::Resolved.tone(), Tone::Success);
    }

    #[test]
    fn test_timeline_for_investigating_issue() {
        let issue = &Issue::get_issues().unwrap()[0];
        let timeline = issue.timeline();
        assert_eq!(timeline.len(), 5);
        let states: Vec<StageState> = timeline.iter().map(|s| s.state).collect();
        assert_eq!(
            states,
            vec![
                StageState::Completed,
                StageState::Completed,
                StageState::Current,
                StageState::Pending,
                StageState::Pending,
            ]
        );
        assert_eq!(timeline[0].date, date(2024, 1, 15));
        assert_eq!(timeline[2].date, date(2024, 1, 16));
        assert_eq!(timeline[4].date, date(2024, 1, 18));
    }

    #[test]
    fn test_timeline_open_and_resolved() {
        let mut issue = Issue::get_issues().unwrap()[1].clone();
        assert!(issue.is_open());
        let timeline = issue.timeline();
        assert_eq!(timeline[0].state, StageState::Completed);
        assert_eq!(timeline[1].state, StageState::Current);

        issue.status = IssueStatus::Resolved;
        assert!(issue
            .timeline()
            .iter()
            .all(|s| s.state == StageState::Completed));
    }

    #[test]
    fn test_parse_rejects_unknown_severity() {
        let csv_data = "\
id,title,type,severity,location,reported_date,description,affected_area,status
9,Noise,pollution,extreme,Mirpur,2024-02-01,Loud,1 km²,open
";
        assert!(matches!(
            Issue::parse_issue_csv(csv_data),
            Err(ModelError::UnknownSeverity(_))
        ));
    }

    #[test]
    fn test_parse_rejects_bad_date() {
        let csv_data = "\
id,title,type,severity,location,reported_date,description,affected_area,status
9,Noise,pollution,low,Mirpur,01/02/2024,Loud,1 km²,open
";
        assert!(matches!(
            Issue::parse_issue_csv(csv_data),
            Err(ModelError::DateParse(_))
        ));
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("Resolved".parse::<IssueStatus>().unwrap(), IssueStatus::Resolved);
        assert!("closed".parse::<IssueStatus>().is_err());
    }
}
