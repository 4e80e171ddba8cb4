use serde::Serialize;

/// Badge colour family used by the dashboard for statuses and severities.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Warning,
    Destructive,
    Secondary,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Success => "success",
            Tone::Warning => "warning",
            Tone::Destructive => "destructive",
            Tone::Secondary => "secondary",
        }
    }
}
