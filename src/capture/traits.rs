//! Capture trait definitions
//!
//! Platform-agnostic frame source abstraction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Capture errors
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Frame unavailable: {0}")]
    FrameUnavailable(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Unsupported: {0}")]
    Unsupported(String),
}

/// Result type for capture operations
pub type CaptureResult<T> = Result<T, CaptureError>;

/// Information about a camera/webcam
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraInfo {
    /// Unique device ID
    pub id: String,

    /// Device name
    pub name: String,
}

/// Video resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A single RGBA frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaFrame {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA, 4 bytes per pixel
    pub data: Vec<u8>,
}

impl RgbaFrame {
    /// Wrap a pixel buffer, checking its size
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> CaptureResult<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(CaptureError::FrameUnavailable(format!(
                "expected {} bytes for {}x{} RGBA, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }
}

/// A live video source owned by a capture session
///
/// `grab` returns the most recent frame. `release` frees the underlying device
/// and is called exactly once, by [`CaptureDevice`](super::device::CaptureDevice).
pub trait FrameSource: Send {
    /// Source identifier for logs
    fn id(&self) -> &str;

    /// Current frame
    fn grab(&mut self) -> CaptureResult<RgbaFrame>;

    /// Release the underlying device
    fn release(&mut self);
}
