//! Broadcasting of pipeline progress for UI collaborators.
//!
//! Subscribers (a desktop shell, a mobile bridge, a test) receive every phase
//! change, notice and submission as a serializable event.

pub mod pipeline_progress;

pub use pipeline_progress::{PipelinePhase, PipelineProgressEvent, ProgressBroadcaster};
