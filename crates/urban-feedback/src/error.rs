use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UrbanFeedbackError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Geocoding error: {0}")]
    Geocode(#[from] crate::geocode::GeocodeError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] crate::pipeline::PipelineError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

impl ConfigError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        ConfigError::Validation {
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("Capture cancelled by user")]
    Cancelled,

    #[error("Capture failed: {0}")]
    Failed(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("Cannot submit without detected data and a captured image")]
    InvalidSubmission,

    #[error("This report has already been submitted")]
    AlreadySubmitted,

    #[error("Report '{0}' not found")]
    NotFound(String),

    #[error("Report '{id}' cannot move from {from} to {to}")]
    StatusRegression {
        id: String,
        from: crate::report::ReportStatus,
        to: crate::report::ReportStatus,
    },
}

#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("A global tracing subscriber is already installed")]
    AlreadyInitialized,
}

pub type Result<T> = std::result::Result<T, UrbanFeedbackError>;
