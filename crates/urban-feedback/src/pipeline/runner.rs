use std::sync::Arc;

use tracing::{debug, info, info_span, warn, Instrument};

use crate::broadcast::PipelinePhase;
use crate::classifier::{CategoryAssessment, Classifier, SimulatedClassifier};
use crate::config::Config;
use crate::device::{
    CaptureCapability, ImageHandle, PermissionCapability, PositionCapability,
};
use crate::error::{CaptureError, UrbanFeedbackError};
use crate::geocode::{GeocodingStage, NominatimClient};
use crate::location::LocationStage;

use super::config::PipelineConfig;
use super::error::PipelineError;
use super::progress::{ProgressEvent, ProgressReporter};
use super::session::{PipelineSession, RunToken};
use super::state::{DetectedData, Notice, PipelineState};

/// Result of one run.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// Every stage succeeded (the address may still be the coordinate fallback).
    Success(DetectedData),
    /// A non-permission failure occurred; defaults were substituted.
    Degraded(DetectedData),
    /// Location permission was denied. Nothing was produced.
    Aborted,
}

impl PipelineOutcome {
    pub fn detected(&self) -> Option<&DetectedData> {
        match self {
            PipelineOutcome::Success(d) | PipelineOutcome::Degraded(d) => Some(d),
            PipelineOutcome::Aborted => None,
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, PipelineOutcome::Aborted)
    }
}

/// Drives a captured image through upload, classification, permission check,
/// position acquisition and reverse geocoding, strictly in that order.
pub struct Pipeline {
    config: Arc<PipelineConfig>,
    classifier: Arc<dyn Classifier>,
    location: LocationStage,
    geocoding: GeocodingStage,
    session: Arc<PipelineSession>,
    progress: Arc<dyn ProgressReporter>,
}

impl Pipeline {
    pub fn new(
        config: Arc<PipelineConfig>,
        classifier: Arc<dyn Classifier>,
        location: LocationStage,
        geocoding: GeocodingStage,
        progress: Arc<dyn ProgressReporter>,
    ) -> Self {
        Self {
            config,
            classifier,
            location,
            geocoding,
            session: Arc::new(PipelineSession::new()),
            progress,
        }
    }

    /// Production constructor: simulated classifier and the Nominatim client,
    /// with the host's permission and GPS capabilities.
    pub fn from_config(
        config: &Config,
        permission: Arc<dyn PermissionCapability>,
        position: Arc<dyn PositionCapability>,
        progress: Arc<dyn ProgressReporter>,
    ) -> Result<Self, UrbanFeedbackError> {
        let pipeline_config = Arc::new(PipelineConfig::from_config(config)?);
        let classifier = Arc::new(SimulatedClassifier::from_config(&config.classifier));
        let location = LocationStage::from_config(permission, position, &config.location);
        let geocoder = Arc::new(NominatimClient::from_config(&config.geocoding)?);
        let geocoding = GeocodingStage::from_config(geocoder, &config.geocoding);

        Ok(Self::new(
            pipeline_config,
            classifier,
            location,
            geocoding,
            progress,
        ))
    }

    /// Shared handle on the run state, for the finalizer and UI collaborators.
    pub fn session(&self) -> Arc<PipelineSession> {
        Arc::clone(&self.session)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn progress(&self) -> Arc<dyn ProgressReporter> {
        Arc::clone(&self.progress)
    }

    pub fn state(&self) -> PipelineState {
        self.session.snapshot()
    }

    pub fn set_description(&self, description: impl Into<String>) {
        self.session.set_description(description);
    }

    /// Discards the current image and detection. A run still in flight finishes
    /// but its result is not applied.
    pub fn retake(&self) {
        let token = self.session.retake();
        debug!(run = token.id(), "Retake requested");
        self.progress.report(ProgressEvent::Reset { run: token.id() });
    }

    /// Captures an image and runs the pipeline on it. A cancelled capture
    /// leaves the state untouched and yields `None`.
    pub async fn capture_and_run(
        &self,
        capture: &dyn CaptureCapability,
    ) -> Result<Option<PipelineOutcome>, CaptureError> {
        match capture.capture().await {
            Ok(image) => Ok(Some(self.run_pipeline(image).await)),
            Err(CaptureError::Cancelled) => {
                debug!("Capture cancelled");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Runs all stages for `image`. Starting a run invalidates any earlier one.
    pub async fn run_pipeline(&self, image: ImageHandle) -> PipelineOutcome {
        let token = self.session.begin_run(image.clone());
        let span = info_span!("pipeline", run = token.id(), image = %image);

        async {
            info!("Pipeline run started");
            let outcome = match self.execute(&token, &image).await {
                Ok(detected) => PipelineOutcome::Success(detected),
                Err(e) if e.aborts_run() => {
                    warn!("Pipeline aborted: {}", e);
                    PipelineOutcome::Aborted
                }
                Err(e) => {
                    warn!("Pipeline degraded: {}", e);
                    PipelineOutcome::Degraded(self.fallback_detection())
                }
            };
            self.finish(&token, &outcome);
            outcome
        }
        .instrument(span)
        .await
    }

    async fn execute(
        &self,
        token: &RunToken,
        image: &ImageHandle,
    ) -> Result<DetectedData, PipelineError> {
        // Step 1: Upload
        self.enter_phase(token, PipelinePhase::Uploading);
        tokio::time::sleep(self.config.upload_delay)
            .instrument(info_span!("upload"))
            .await;

        // Step 2: Classify
        self.enter_phase(token, PipelinePhase::Analyzing);
        let classification = self
            .classifier
            .classify(image)
            .instrument(info_span!("classify"))
            .await?;
        debug!(
            category = classification.category.id,
            confidence = classification.confidence,
            "Image classified"
        );

        // Step 3: Permission gate
        self.enter_phase(token, PipelinePhase::Locating);
        let permission = self
            .location
            .check_permission()
            .instrument(info_span!("check_permission"))
            .await;
        if permission.is_denied() {
            return Err(PipelineError::PermissionDenied);
        }

        // Step 4: Position
        let coords = self
            .location
            .acquire()
            .instrument(info_span!("locate"))
            .await?;

        // Step 5: Reverse geocode (never fails, falls back to coordinates)
        self.enter_phase(token, PipelinePhase::ResolvingAddress);
        let address = self
            .geocoding
            .resolve(coords)
            .instrument(info_span!("geocode"))
            .await;

        Ok(DetectedData {
            category: classification.into_assessment(),
            address: address.text,
        })
    }

    fn fallback_detection(&self) -> DetectedData {
        DetectedData {
            category: CategoryAssessment::fallback(self.config.default_category),
            address: self.config.undetermined_address.clone(),
        }
    }

    fn enter_phase(&self, token: &RunToken, phase: PipelinePhase) {
        if self.session.update(token, |state| state.enter(phase)) {
            self.progress.report(ProgressEvent::Phase {
                run: token.id(),
                phase,
            });
        } else {
            debug!(%phase, "Run superseded, progress not applied");
        }
    }

    fn finish(&self, token: &RunToken, outcome: &PipelineOutcome) {
        let (phase, notice) = match outcome {
            PipelineOutcome::Success(_) => (PipelinePhase::Completed, None),
            PipelineOutcome::Degraded(_) => {
                (PipelinePhase::Degraded, Some(Notice::LocationUnavailable))
            }
            PipelineOutcome::Aborted => (PipelinePhase::Aborted, Some(Notice::PermissionRequired)),
        };
        let detected = outcome.detected().cloned();

        let applied = self.session.update(token, |state| match outcome {
            PipelineOutcome::Aborted => {
                *state = PipelineState {
                    notice,
                    ..PipelineState::default()
                };
            }
            _ => {
                state.is_analyzing = false;
                state.enter(phase);
                state.detected = detected.clone();
                state.notice = notice;
            }
        });

        if !applied {
            info!(%phase, "Run superseded, result discarded");
            return;
        }

        if let Some(notice) = notice {
            self.progress.report(ProgressEvent::Notice {
                run: token.id(),
                notice,
            });
        }
        self.progress.report(ProgressEvent::Finished {
            run: token.id(),
            phase,
            detected,
        });
        info!(%phase, "Pipeline run finished");
    }
}
