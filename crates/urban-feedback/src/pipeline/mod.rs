pub mod config;
pub mod error;
pub mod progress;
pub mod runner;
pub mod session;
pub mod state;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use progress::{BroadcastProgress, NoopProgress, ProgressEvent, ProgressReporter};
pub use runner::{Pipeline, PipelineOutcome};
pub use session::{PipelineSession, RunToken};
pub use state::{DetectedData, Notice, PipelineState, UNDETERMINED_ADDRESS};
