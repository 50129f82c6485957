use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::GeocodingConfig;
use crate::device::Coordinates;

use super::address::shorten_display_name;
use super::{GeocodeError, ReverseGeocoder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressSource {
    Lookup,
    CoordinateFallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAddress {
    /// Never empty.
    pub text: String,
    pub source: AddressSource,
}

/// Resolves coordinates to an address and never fails.
///
/// Any lookup failure (transport, status, parse, missing field, timeout) is
/// absorbed here and replaced by the 5-decimal coordinate string.
pub struct GeocodingStage {
    geocoder: Arc<dyn ReverseGeocoder>,
    timeout: Duration,
    max_segments: usize,
}

impl GeocodingStage {
    pub fn new(geocoder: Arc<dyn ReverseGeocoder>, timeout: Duration, max_segments: usize) -> Self {
        Self {
            geocoder,
            timeout,
            max_segments,
        }
    }

    pub fn from_config(geocoder: Arc<dyn ReverseGeocoder>, config: &GeocodingConfig) -> Self {
        Self::new(geocoder, config.timeout(), config.max_segments)
    }

    pub async fn resolve(&self, coords: Coordinates) -> ResolvedAddress {
        match self.lookup(coords).await {
            Ok(text) => {
                debug!(address = %text, "Address resolved");
                ResolvedAddress {
                    text,
                    source: AddressSource::Lookup,
                }
            }
            Err(e) => {
                warn!("Reverse geocoding failed, using coordinates: {}", e);
                ResolvedAddress {
                    text: coords.to_fixed_string(),
                    source: AddressSource::CoordinateFallback,
                }
            }
        }
    }

    async fn lookup(&self, coords: Coordinates) -> Result<String, GeocodeError> {
        let display_name = tokio::time::timeout(self.timeout, self.geocoder.lookup(coords))
            .await
            .map_err(|_| GeocodeError::Timeout(self.timeout))??;

        shorten_display_name(&display_name, self.max_segments)
            .ok_or(GeocodeError::MissingDisplayName)
    }
}
