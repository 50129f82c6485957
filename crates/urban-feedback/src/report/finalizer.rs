use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::ReportError;
use crate::pipeline::{Pipeline, PipelineSession, ProgressEvent, ProgressReporter};

use super::model::Report;
use super::store::ReportStore;

/// A stored report plus the pending reset of the submission form.
#[derive(Debug)]
pub struct Submission {
    pub report: Report,
    /// Resolves to `true` if the reset was applied, `false` if a newer run
    /// had started by the time it fired.
    pub reset: JoinHandle<bool>,
}

/// Turns the detection of the current run into a stored report, then resets
/// the flow after a short acknowledgment window.
pub struct SubmissionFinalizer {
    store: Arc<ReportStore>,
    session: Arc<PipelineSession>,
    progress: Arc<dyn ProgressReporter>,
    reset_delay: Duration,
}

impl SubmissionFinalizer {
    pub fn new(
        store: Arc<ReportStore>,
        session: Arc<PipelineSession>,
        progress: Arc<dyn ProgressReporter>,
        reset_delay: Duration,
    ) -> Self {
        Self {
            store,
            session,
            progress,
            reset_delay,
        }
    }

    /// Shares the pipeline's session, reporter and reset delay.
    pub fn from_pipeline(pipeline: &Pipeline, store: Arc<ReportStore>) -> Self {
        Self::new(
            store,
            pipeline.session(),
            pipeline.progress(),
            pipeline.config().reset_delay,
        )
    }

    pub fn store(&self) -> &Arc<ReportStore> {
        &self.store
    }

    /// Submits the current detection with `description`.
    ///
    /// Must be called from within a Tokio runtime: the delayed reset is a
    /// spawned task. The reset is skipped if a new capture or retake happened
    /// in the meantime.
    pub fn submit(&self, description: impl Into<String>) -> Result<Submission, ReportError> {
        let claim = self.session.claim_submission()?;
        let report = Report::from_detected(claim.image, claim.detected, description);
        self.store.append(report.clone());
        info!(
            report_id = report.id(),
            category = %report.category().id,
            "Report submitted"
        );

        self.progress.report(ProgressEvent::Submitted {
            run: claim.token.id(),
            report_id: report.id().to_string(),
        });

        let session = Arc::clone(&self.session);
        let progress = Arc::clone(&self.progress);
        let delay = self.reset_delay;
        let token = claim.token;
        let reset = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if session.reset_if_current(&token) {
                progress.report(ProgressEvent::Reset { run: token.id() });
                debug!(run = token.id(), "Submission form reset");
                true
            } else {
                debug!(run = token.id(), "Reset skipped, a newer run is active");
                false
            }
        });

        Ok(Submission { report, reset })
    }

    /// Submits using the description draft held in the session.
    pub fn submit_draft(&self) -> Result<Submission, ReportError> {
        let description = self.session.snapshot().description;
        self.submit(description)
    }
}
