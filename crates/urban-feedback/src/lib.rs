pub mod broadcast;
pub mod classifier;
pub mod config;
pub mod device;
pub mod error;
pub mod geocode;
pub mod location;
pub mod pipeline;
pub mod report;
pub mod telemetry;

pub use broadcast::{PipelinePhase, PipelineProgressEvent, ProgressBroadcaster};
pub use classifier::{CategoryAssessment, Classifier, IncidentCategory, SimulatedClassifier};
pub use config::{load_config, load_config_or_default, Config};
pub use device::{
    CaptureCapability, Coordinates, ImageHandle, PermissionCapability, PermissionState,
    PositionCapability, PositionError, PositionOptions,
};
pub use error::{
    CaptureError, ConfigError, ReportError, Result, TelemetryError, UrbanFeedbackError,
};
pub use geocode::{GeocodeError, GeocodingStage, NominatimClient, ReverseGeocoder};
pub use location::LocationStage;
pub use pipeline::{
    BroadcastProgress, DetectedData, NoopProgress, Notice, Pipeline, PipelineOutcome,
    PipelineSession, PipelineState, ProgressReporter,
};
pub use report::{Report, ReportStatus, ReportStore, Submission, SubmissionFinalizer};
pub use telemetry::init_tracing;
