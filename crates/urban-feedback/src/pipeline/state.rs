use serde::{Deserialize, Serialize};

use crate::broadcast::PipelinePhase;
use crate::classifier::CategoryAssessment;
use crate::device::ImageHandle;

/// Address stored when a run degrades before an address could be resolved.
pub const UNDETERMINED_ADDRESS: &str = "location undetermined";

/// Category and address produced by a run, before they become a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedData {
    pub category: CategoryAssessment,
    pub address: String,
}

/// User-facing notices raised by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// Location permission is denied; the run was stopped.
    PermissionRequired,
    /// Location could not be determined; defaults were used.
    LocationUnavailable,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::PermissionRequired => {
                "Please grant location permission to use this feature."
            }
            Notice::LocationUnavailable => "Could not get your location. Please check GPS.",
        }
    }
}

/// Transient state of the report flow between capture and submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineState {
    pub image: Option<ImageHandle>,
    pub is_analyzing: bool,
    pub phase: Option<PipelinePhase>,
    /// Label of the active phase, empty when idle.
    pub step_label: String,
    pub detected: Option<DetectedData>,
    pub description: String,
    pub notice: Option<Notice>,
    /// Success acknowledgment, set between submission and the delayed reset.
    pub submitted: bool,
}

impl PipelineState {
    pub(crate) fn for_capture(image: ImageHandle) -> Self {
        Self {
            image: Some(image),
            is_analyzing: true,
            ..Self::default()
        }
    }

    pub(crate) fn enter(&mut self, phase: PipelinePhase) {
        self.phase = Some(phase);
        self.step_label = phase.label().to_string();
    }

    /// No image, nothing detected, nothing running and no draft.
    ///
    /// `notice` is not considered: an aborted run returns to idle but keeps
    /// `Notice::PermissionRequired` so the host can still show it.
    pub fn is_idle(&self) -> bool {
        self.image.is_none()
            && self.detected.is_none()
            && !self.is_analyzing
            && !self.submitted
            && self.description.is_empty()
    }

    /// The confirmation form can be submitted.
    pub fn can_submit(&self) -> bool {
        self.image.is_some() && self.detected.is_some() && !self.is_analyzing && !self.submitted
    }
}
