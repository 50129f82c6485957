//! Test harness for isolated pipeline runs.
//!
//! The `TestHarness` struct wires the pipeline, a report store, the submission
//! finalizer and the progress broadcaster together with scripted collaborators.
//! Tests run under paused Tokio time, so the simulated delays cost nothing.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

use urban_feedback::classifier::Classifier;
use urban_feedback::device::{Coordinates, ImageHandle, PermissionState, PositionOptions};
use urban_feedback::geocode::{GeocodeError, GeocodingStage};
use urban_feedback::pipeline::{PipelineConfig, PipelineOutcome, PipelineState};
use urban_feedback::{
    BroadcastProgress, LocationStage, Pipeline, PipelineProgressEvent, ProgressBroadcaster,
    Report, ReportStore, SubmissionFinalizer,
};

use super::builders::{
    CallLog, ScriptedClassifier, ScriptedGeocoder, ScriptedPermission, ScriptedPosition,
    NGUYEN_HUE, NGUYEN_HUE_DISPLAY_NAME,
};

pub struct TestHarness {
    pub pipeline: Arc<Pipeline>,
    pub store: Arc<ReportStore>,
    pub finalizer: SubmissionFinalizer,
    pub position: Arc<ScriptedPosition>,
    pub geocoder: Arc<ScriptedGeocoder>,
    pub log: CallLog,
    events: broadcast::Receiver<PipelineProgressEvent>,
}

/// Builder for `TestHarness`; every collaborator defaults to the happy path.
pub struct HarnessBuilder {
    classifier: ScriptedClassifier,
    permission: PermissionState,
    position: Option<ScriptedPosition>,
    geocoder: ScriptedGeocoder,
    store: ReportStore,
    log: CallLog,
}

impl HarnessBuilder {
    pub fn classifier(mut self, classifier: ScriptedClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn permission(mut self, state: PermissionState) -> Self {
        self.permission = state;
        self
    }

    pub fn position(mut self, coords: Coordinates) -> Self {
        self.position = Some(ScriptedPosition::fix(coords, self.log.clone()));
        self
    }

    pub fn no_gps_fix(mut self) -> Self {
        self.position = Some(ScriptedPosition::no_fix(self.log.clone()));
        self
    }

    pub fn gps_platform_error(mut self, message: &str) -> Self {
        self.position = Some(ScriptedPosition::platform_error(message, self.log.clone()));
        self
    }

    pub fn geocode_failure(mut self, error: GeocodeError) -> Self {
        self.geocoder = ScriptedGeocoder::failing(error);
        self
    }

    pub fn display_name(mut self, name: &str) -> Self {
        self.geocoder = ScriptedGeocoder::display_name(name);
        self
    }

    pub fn seeded(mut self, reports: Vec<Report>) -> Self {
        self.store = ReportStore::with_reports(reports);
        self
    }

    pub fn build(self) -> TestHarness {
        let broadcaster = ProgressBroadcaster::new(64);
        let events = broadcaster.subscribe();
        let progress = Arc::new(BroadcastProgress::new(broadcaster));

        let position = Arc::new(
            self.position
                .unwrap_or_else(|| ScriptedPosition::fix(NGUYEN_HUE, self.log.clone())),
        );
        let geocoder = Arc::new(self.geocoder);
        let classifier: Arc<dyn Classifier> = Arc::new(self.classifier);

        let location = LocationStage::new(
            Arc::new(ScriptedPermission::new(self.permission, self.log.clone())),
            position.clone(),
            PositionOptions {
                high_accuracy: true,
                timeout: Duration::from_secs(10),
            },
        );
        let geocoding = GeocodingStage::new(geocoder.clone(), Duration::from_secs(8), 3);

        let pipeline = Arc::new(Pipeline::new(
            Arc::new(PipelineConfig::default()),
            classifier,
            location,
            geocoding,
            progress,
        ));
        let store = Arc::new(self.store);
        let finalizer = SubmissionFinalizer::from_pipeline(&pipeline, Arc::clone(&store));

        TestHarness {
            pipeline,
            store,
            finalizer,
            position,
            geocoder,
            log: self.log,
            events,
        }
    }
}

impl TestHarness {
    pub fn builder() -> HarnessBuilder {
        HarnessBuilder {
            classifier: ScriptedClassifier::returning("trash", 0.91),
            permission: PermissionState::Granted,
            position: None,
            geocoder: ScriptedGeocoder::display_name(NGUYEN_HUE_DISPLAY_NAME),
            store: ReportStore::new(),
            log: CallLog::default(),
        }
    }

    /// Harness with every collaborator on the happy path.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub async fn run(&self, image: &str) -> PipelineOutcome {
        self.pipeline.run_pipeline(ImageHandle::new(image)).await
    }

    /// Starts a run in the background.
    pub fn spawn_run(&self, image: &str) -> tokio::task::JoinHandle<PipelineOutcome> {
        let pipeline = Arc::clone(&self.pipeline);
        let image = ImageHandle::new(image);
        tokio::spawn(async move { pipeline.run_pipeline(image).await })
    }

    pub fn state(&self) -> PipelineState {
        self.pipeline.state()
    }

    /// Drains every progress event emitted so far.
    pub fn drain_events(&mut self) -> Vec<PipelineProgressEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }
}
