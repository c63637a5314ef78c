//! Frame capture
//!
//! This module provides the frame sources fed to the recognizer and the
//! downsampling/encoding applied before frames leave the machine.

pub mod device;
pub mod frame;
pub mod pattern;
pub mod traits;

#[cfg(feature = "camera")]
pub mod webcam;

pub use device::CaptureDevice;
pub use frame::{EncodedFrame, FrameEncoder, ImageFormat};
pub use pattern::PatternSource;
pub use traits::{CameraInfo, CaptureError, CaptureResult, FrameSource, Resolution, RgbaFrame};

use serde::{Deserialize, Serialize};

/// Which kind of source to open for a capture session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Webcam,
    Pattern,
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "webcam" | "camera" => Ok(Self::Webcam),
            "pattern" => Ok(Self::Pattern),
            other => Err(format!("unknown source '{}'", other)),
        }
    }
}

/// Open a frame source
pub fn open_source(
    kind: SourceKind,
    device_id: Option<&str>,
    resolution: Resolution,
) -> CaptureResult<Box<dyn FrameSource>> {
    match kind {
        SourceKind::Pattern => Ok(Box::new(PatternSource::new(resolution))),
        SourceKind::Webcam => open_webcam(device_id, resolution),
    }
}

#[cfg(feature = "camera")]
fn open_webcam(device_id: Option<&str>, resolution: Resolution) -> CaptureResult<Box<dyn FrameSource>> {
    Ok(Box::new(webcam::WebcamSource::open(device_id, resolution)?))
}

#[cfg(not(feature = "camera"))]
fn open_webcam(_device_id: Option<&str>, _resolution: Resolution) -> CaptureResult<Box<dyn FrameSource>> {
    Err(CaptureError::Unsupported(
        "built without the `camera` feature".to_string(),
    ))
}

/// Get list of available cameras
pub fn get_cameras() -> Vec<CameraInfo> {
    #[cfg(feature = "camera")]
    {
        webcam::get_cameras()
    }

    #[cfg(not(feature = "camera"))]
    {
        Vec::new()
    }
}
