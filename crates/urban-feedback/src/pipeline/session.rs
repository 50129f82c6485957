//! Run tokens guarding the shared [`PipelineState`].
//!
//! Every capture, retake and reset bumps a generation counter. Work started under
//! an older generation (a slow pipeline run, the delayed post-submit reset) may
//! still finish, but its writes are dropped once the generation has moved on.

use std::sync::{Mutex, MutexGuard};

use crate::device::ImageHandle;
use crate::error::ReportError;

use super::state::{DetectedData, PipelineState};

/// Identifies the run that was current when it was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunToken {
    generation: u64,
}

impl RunToken {
    pub fn id(&self) -> u64 {
        self.generation
    }
}

struct Inner {
    generation: u64,
    state: PipelineState,
}

/// What the finalizer needs to build a report, claimed atomically.
pub(crate) struct Claim {
    pub token: RunToken,
    pub image: ImageHandle,
    pub detected: DetectedData,
}

pub struct PipelineSession {
    inner: Mutex<Inner>,
}

impl PipelineSession {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                generation: 0,
                state: PipelineState::default(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Pipeline session lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    /// Starts a run for `image`, invalidating every earlier token.
    pub fn begin_run(&self, image: ImageHandle) -> RunToken {
        let mut inner = self.lock();
        inner.generation += 1;
        inner.state = PipelineState::for_capture(image);
        RunToken {
            generation: inner.generation,
        }
    }

    /// Clears the state for a fresh capture. In-flight runs keep going but can no
    /// longer write.
    pub fn retake(&self) -> RunToken {
        let mut inner = self.lock();
        inner.generation += 1;
        inner.state = PipelineState::default();
        RunToken {
            generation: inner.generation,
        }
    }

    /// Applies `f` only while `token` is current. Returns whether it ran.
    pub fn update<F>(&self, token: &RunToken, f: F) -> bool
    where
        F: FnOnce(&mut PipelineState),
    {
        let mut inner = self.lock();
        if inner.generation != token.generation {
            return false;
        }
        f(&mut inner.state);
        true
    }

    /// Resets to idle if `token` is still current. Returns whether it did.
    pub fn reset_if_current(&self, token: &RunToken) -> bool {
        self.update(token, |state| *state = PipelineState::default())
    }

    /// Replaces the description draft of whatever run is current.
    pub fn set_description(&self, description: impl Into<String>) {
        self.lock().state.description = description.into();
    }

    pub fn snapshot(&self) -> PipelineState {
        self.lock().state.clone()
    }

    /// Marks the current state as submitted and hands out its image and detection.
    pub(crate) fn claim_submission(&self) -> Result<Claim, ReportError> {
        let mut inner = self.lock();
        let token = RunToken {
            generation: inner.generation,
        };
        let state = &mut inner.state;
        if state.submitted {
            return Err(ReportError::AlreadySubmitted);
        }
        let (Some(image), Some(detected)) = (state.image.clone(), state.detected.clone()) else {
            return Err(ReportError::InvalidSubmission);
        };
        state.submitted = true;
        Ok(Claim {
            token,
            image,
            detected,
        })
    }
}

impl Default for PipelineSession {
    fn default() -> Self {
        Self::new()
    }
}
