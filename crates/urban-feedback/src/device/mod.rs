//! Device capabilities the pipeline consumes but does not implement.
//!
//! Hosts provide the camera/file picker, the permission prompt and the GPS
//! receiver; the pipeline only sees these traits.

pub mod capture;
pub mod location;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use capture::CaptureCapability;
pub use location::{
    PermissionCapability, PermissionState, PositionCapability, PositionError, PositionOptions,
};

/// Opaque reference to a captured image. The capture subsystem keeps ownership
/// of the pixels; the pipeline never looks inside.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageHandle(Arc<str>);

impl ImageHandle {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(Arc::from(reference.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// WGS84 latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `"lat, lng"` with both values rounded to 5 decimal places (about 1 m).
    pub fn to_fixed_string(&self) -> String {
        format!("{:.5}, {:.5}", self.lat, self.lng)
    }
}
