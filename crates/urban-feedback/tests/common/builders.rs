//! Scripted fakes for the pipeline's collaborators.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use urban_feedback::classifier::{Classification, ClassifyError};
use urban_feedback::device::{
    CaptureCapability, Coordinates, ImageHandle, PermissionCapability, PermissionState,
    PositionCapability, PositionError, PositionOptions,
};
use urban_feedback::error::CaptureError;
use urban_feedback::geocode::{GeocodeError, ReverseGeocoder};
use urban_feedback::{Classifier, IncidentCategory};

pub const NGUYEN_HUE: Coordinates = Coordinates {
    lat: 10.77296,
    lng: 106.70030,
};

pub const NGUYEN_HUE_DISPLAY_NAME: &str =
    "123 Nguyen Hue Street, District 1, Ho Chi Minh City, Vietnam";

/// Shared log of capability calls, in order.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<&'static str>>>);

impl CallLog {
    pub fn push(&self, call: &'static str) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.0.lock().unwrap().clone()
    }
}

// ─── Classifier ─────────────────────────────────────────────────────────────

/// Returns a fixed category after a fixed latency.
pub struct ScriptedClassifier {
    result: Result<(&'static str, f32), ClassifyError>,
    latency: Duration,
}

impl ScriptedClassifier {
    pub fn returning(category: &'static str, confidence: f32) -> Self {
        Self {
            result: Ok((category, confidence)),
            latency: Duration::from_millis(2500),
        }
    }

    pub fn failing() -> Self {
        Self {
            result: Err(ClassifyError::Failed("model offline".to_string())),
            latency: Duration::from_millis(2500),
        }
    }
}

#[async_trait]
impl Classifier for ScriptedClassifier {
    async fn classify(&self, _image: &ImageHandle) -> Result<Classification, ClassifyError> {
        tokio::time::sleep(self.latency).await;
        let (id, confidence) = self.result.clone()?;
        let category = IncidentCategory::find(id)
            .ok_or_else(|| ClassifyError::Failed(format!("unknown category '{}'", id)))?;
        Ok(Classification {
            category,
            confidence,
        })
    }
}

// ─── Location ───────────────────────────────────────────────────────────────

pub struct ScriptedPermission {
    state: PermissionState,
    log: CallLog,
}

impl ScriptedPermission {
    pub fn new(state: PermissionState, log: CallLog) -> Self {
        Self { state, log }
    }
}

#[async_trait]
impl PermissionCapability for ScriptedPermission {
    async fn check_location_permission(&self) -> PermissionState {
        self.log.push("check_permission");
        self.state
    }
}

pub struct ScriptedPosition {
    result: Result<Coordinates, PositionError>,
    delay: Duration,
    log: CallLog,
    calls: AtomicUsize,
}

impl ScriptedPosition {
    pub fn fix(coords: Coordinates, log: CallLog) -> Self {
        Self {
            result: Ok(coords),
            delay: Duration::from_millis(300),
            log,
            calls: AtomicUsize::new(0),
        }
    }

    /// Never gets a fix; reports a timeout after `options.timeout`.
    pub fn no_fix(log: CallLog) -> Self {
        Self {
            result: Err(PositionError::Timeout(Duration::ZERO)),
            delay: Duration::ZERO,
            log,
            calls: AtomicUsize::new(0),
        }
    }

    /// Fails immediately with a platform error (receiver off, no provider).
    pub fn platform_error(message: &str, log: CallLog) -> Self {
        Self {
            result: Err(PositionError::Platform(message.to_string())),
            delay: Duration::ZERO,
            log,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PositionCapability for ScriptedPosition {
    async fn current_position(&self, options: PositionOptions) -> Result<Coordinates, PositionError> {
        self.log.push("current_position");
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.result {
            Ok(coords) => {
                tokio::time::sleep(self.delay).await;
                Ok(*coords)
            }
            Err(PositionError::Timeout(_)) => {
                tokio::time::sleep(options.timeout).await;
                Err(PositionError::Timeout(options.timeout))
            }
            Err(e) => Err(e.clone()),
        }
    }
}

// ─── Geocoder ───────────────────────────────────────────────────────────────

pub struct ScriptedGeocoder {
    result: Result<String, GeocodeError>,
    calls: AtomicUsize,
}

impl ScriptedGeocoder {
    pub fn display_name(name: &str) -> Self {
        Self {
            result: Ok(name.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: GeocodeError) -> Self {
        Self {
            result: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReverseGeocoder for ScriptedGeocoder {
    async fn lookup(&self, _coords: Coordinates) -> Result<String, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

// ─── Capture ────────────────────────────────────────────────────────────────

pub struct ScriptedCapture(pub Result<ImageHandle, CaptureError>);

impl ScriptedCapture {
    pub fn image(reference: &str) -> Self {
        Self(Ok(ImageHandle::new(reference)))
    }

    pub fn cancelled() -> Self {
        Self(Err(CaptureError::Cancelled))
    }
}

#[async_trait]
impl CaptureCapability for ScriptedCapture {
    async fn capture(&self) -> Result<ImageHandle, CaptureError> {
        self.0.clone()
    }
}
