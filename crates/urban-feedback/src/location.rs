//! Permission-gated position acquisition.

use std::sync::Arc;

use tracing::debug;

use crate::config::LocationConfig;
use crate::device::{
    Coordinates, PermissionCapability, PermissionState, PositionCapability, PositionError,
    PositionOptions,
};

/// Wraps the permission and GPS capabilities.
///
/// Callers must check permission first and skip [`LocationStage::acquire`] when it
/// is denied. The timeout travels in [`PositionOptions`]; the receiver enforces it.
pub struct LocationStage {
    permission: Arc<dyn PermissionCapability>,
    position: Arc<dyn PositionCapability>,
    options: PositionOptions,
}

impl LocationStage {
    pub fn new(
        permission: Arc<dyn PermissionCapability>,
        position: Arc<dyn PositionCapability>,
        options: PositionOptions,
    ) -> Self {
        Self {
            permission,
            position,
            options,
        }
    }

    pub fn from_config(
        permission: Arc<dyn PermissionCapability>,
        position: Arc<dyn PositionCapability>,
        config: &LocationConfig,
    ) -> Self {
        Self::new(permission, position, PositionOptions::from_config(config))
    }

    pub fn options(&self) -> PositionOptions {
        self.options
    }

    pub async fn check_permission(&self) -> PermissionState {
        let state = self.permission.check_location_permission().await;
        debug!(?state, "Location permission checked");
        state
    }

    pub async fn acquire(&self) -> Result<Coordinates, PositionError> {
        let coords = self.position.current_position(self.options).await?;
        debug!(lat = coords.lat, lng = coords.lng, "Position acquired");
        Ok(coords)
    }
}
