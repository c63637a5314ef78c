//! Scoped ownership of a frame source
//!
//! A [`CaptureDevice`] is acquired when a capture session starts and releases
//! its source on stop, on drop, or when the session is replaced.

use super::traits::{CaptureResult, FrameSource, RgbaFrame};

/// Owns a [`FrameSource`] and releases it exactly once
pub struct CaptureDevice {
    source: Box<dyn FrameSource>,
    released: bool,
}

impl CaptureDevice {
    pub fn new(source: Box<dyn FrameSource>) -> Self {
        tracing::debug!("Acquired capture source {}", source.id());
        Self {
            source,
            released: false,
        }
    }

    pub fn id(&self) -> &str {
        self.source.id()
    }

    /// Grab the current frame from the source
    pub fn grab(&mut self) -> CaptureResult<RgbaFrame> {
        self.source.grab()
    }

    /// Release the source; later calls do nothing
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.source.release();
        tracing::info!("Released capture source {}", self.source.id());
    }
}

impl Drop for CaptureDevice {
    fn drop(&mut self) {
        self.release();
    }
}
