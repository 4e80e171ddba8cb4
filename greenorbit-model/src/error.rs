/// Error types for the GreenOrbit model crate
use thiserror::Error;

/// Main error type for parsing identifiers and fixture rows
#[derive(Error, Debug)]
pub enum ModelError {
    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// A layer id other than temperature, pollution, greenery or flood
    #[error("Unknown layer: {0}")]
    UnknownLayer(String),

    /// A simulation parameter id other than trees, solar, ev or buildings
    #[error("Unknown simulation parameter: {0}")]
    UnknownParameter(String),

    /// Unrecognised severity label
    #[error("Unknown severity: {0}")]
    UnknownSeverity(String),

    /// Unrecognised issue status label
    #[error("Unknown issue status: {0}")]
    UnknownStatus(String),

    /// Unrecognised metric trend or status label
    #[error("Invalid metric field: {0}")]
    InvalidMetric(String),

    /// Unrecognised alert kind
    #[error("Unknown alert kind: {0}")]
    UnknownAlertKind(String),

    /// Date parsing failed
    #[error("Failed to parse date: {0}")]
    DateParse(String),

    /// A required column was missing or not numeric
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

/// Type alias for Results using ModelError
pub type Result<T> = std::result::Result<T, ModelError>;
