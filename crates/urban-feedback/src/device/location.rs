use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::LocationConfig;

use super::Coordinates;

/// Location permission as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    Granted,
    Denied,
    /// Not decided yet; the platform prompts on the first position request.
    Prompt,
}

impl PermissionState {
    pub fn is_denied(&self) -> bool {
        matches!(self, PermissionState::Denied)
    }
}

#[async_trait]
pub trait PermissionCapability: Send + Sync {
    async fn check_location_permission(&self) -> PermissionState;
}

/// Options passed through to the GPS receiver. The receiver enforces the timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
}

impl PositionOptions {
    pub fn from_config(config: &LocationConfig) -> Self {
        Self {
            high_accuracy: config.high_accuracy,
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self::from_config(&LocationConfig::default())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("Position not acquired within {0:?}")]
    Timeout(Duration),

    #[error("Position unavailable: {0}")]
    Platform(String),
}

#[async_trait]
pub trait PositionCapability: Send + Sync {
    async fn current_position(&self, options: PositionOptions)
        -> Result<Coordinates, PositionError>;
}
