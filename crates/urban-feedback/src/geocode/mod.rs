//! Reverse geocoding: coordinates to a short human-readable address.

pub mod address;
pub mod nominatim;
pub mod stage;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::device::Coordinates;

pub use address::shorten_display_name;
pub use nominatim::NominatimClient;
pub use stage::{AddressSource, GeocodingStage, ResolvedAddress};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeocodeError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Geocoding request failed: {0}")]
    Transport(String),

    #[error("Geocoding service returned HTTP {0}")]
    Status(u16),

    #[error("Geocoding service reported an error: {0}")]
    Service(String),

    #[error("Malformed geocoding response: {0}")]
    Malformed(String),

    #[error("Geocoding response has no display_name")]
    MissingDisplayName,

    #[error("Geocoding lookup exceeded {0:?}")]
    Timeout(Duration),
}

/// Network lookup returning the service's full comma-delimited display name.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn lookup(&self, coords: Coordinates) -> Result<String, GeocodeError>;
}
