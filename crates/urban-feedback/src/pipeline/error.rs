use thiserror::Error;

use crate::classifier::ClassifyError;
use crate::device::PositionError;

/// Failures inside a run. Only `PermissionDenied` aborts; the rest degrade.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location acquisition failed: {0}")]
    Acquisition(#[from] PositionError),

    #[error("Classification failed: {0}")]
    Classification(#[from] ClassifyError),
}

impl PipelineError {
    pub fn aborts_run(&self) -> bool {
        matches!(self, PipelineError::PermissionDenied)
    }
}
