use async_trait::async_trait;

use crate::error::CaptureError;

use super::ImageHandle;

/// Camera or file picker. Returns `CaptureError::Cancelled` when the user backs out.
#[async_trait]
pub trait CaptureCapability: Send + Sync {
    async fn capture(&self) -> Result<ImageHandle, CaptureError>;
}
