//! Synthetic frame source
//!
//! Produces a moving gradient. Useful for exercising the backend without a
//! camera attached.

use super::traits::{CaptureError, CaptureResult, FrameSource, Resolution, RgbaFrame};

/// Animated test pattern
pub struct PatternSource {
    id: String,
    resolution: Resolution,
    frame_index: u32,
    released: bool,
}

impl PatternSource {
    pub fn new(resolution: Resolution) -> Self {
        Self {
            id: "pattern".to_string(),
            resolution,
            frame_index: 0,
            released: false,
        }
    }
}

impl FrameSource for PatternSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn grab(&mut self) -> CaptureResult<RgbaFrame> {
        if self.released {
            return Err(CaptureError::FrameUnavailable(
                "pattern source released".to_string(),
            ));
        }

        let Resolution { width, height } = self.resolution;
        let w = width.max(1);
        let shift = self.frame_index.wrapping_mul(4) % w;
        self.frame_index = self.frame_index.wrapping_add(1);

        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                let r = ((x + shift) % w * 255 / w) as u8;
                let g = (y * 255 / height.max(1)) as u8;
                data.extend_from_slice(&[r, g, 128, 255]);
            }
        }

        RgbaFrame::new(width, height, data)
    }

    fn release(&mut self) {
        self.released = true;
    }
}
