//! Frame downsampling and encoding
//!
//! Frames are shrunk to a small fixed size, compressed, and shipped as a data
//! URL. The backend only needs enough detail to find hand landmarks.

use super::traits::{CaptureError, CaptureResult, Resolution, RgbaFrame};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Compression used for outgoing frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }
}

/// A compressed frame ready to send
#[derive(Debug, Clone)]
pub struct EncodedFrame {
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

impl EncodedFrame {
    /// `data:<mime>;base64,<payload>`
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.format.mime_type(),
            STANDARD.encode(&self.bytes)
        )
    }
}

/// Downsamples and compresses frames
#[derive(Debug, Clone)]
pub struct FrameEncoder {
    target: Resolution,
    format: ImageFormat,
    /// JPEG quality, 1-100
    quality: u8,
}

impl FrameEncoder {
    pub fn new(target: Resolution, format: ImageFormat, quality: u8) -> Self {
        Self {
            target,
            format,
            quality: quality.clamp(1, 100),
        }
    }

    pub fn target(&self) -> Resolution {
        self.target
    }

    /// Downsample then compress a frame
    pub fn encode(&self, frame: &RgbaFrame) -> CaptureResult<EncodedFrame> {
        let scaled = downsample(frame, self.target)?;
        let bytes = match self.format {
            ImageFormat::Jpeg => encode_jpeg(&scaled, self.quality)?,
            ImageFormat::Png => encode_png(&scaled)?,
        };
        Ok(EncodedFrame {
            format: self.format,
            bytes,
        })
    }
}

impl Default for FrameEncoder {
    fn default() -> Self {
        Self::new(Resolution::new(320, 240), ImageFormat::Jpeg, 40)
    }
}

/// Nearest-neighbour resize to exactly `target`, ignoring aspect ratio
pub fn downsample(frame: &RgbaFrame, target: Resolution) -> CaptureResult<RgbaFrame> {
    if target.width == 0 || target.height == 0 || frame.width == 0 || frame.height == 0 {
        return Err(CaptureError::Encoding(format!(
            "cannot scale {}x{} to {}x{}",
            frame.width, frame.height, target.width, target.height
        )));
    }

    if frame.resolution() == target {
        return Ok(frame.clone());
    }

    let (src_w, src_h) = (frame.width as u64, frame.height as u64);
    let (dst_w, dst_h) = (target.width as u64, target.height as u64);
    let mut data = Vec::with_capacity((dst_w * dst_h * 4) as usize);

    for y in 0..dst_h {
        let sy = (y * src_h / dst_h).min(src_h - 1);
        let row = (sy * src_w * 4) as usize;
        for x in 0..dst_w {
            let sx = (x * src_w / dst_w).min(src_w - 1);
            let offset = row + (sx * 4) as usize;
            data.extend_from_slice(&frame.data[offset..offset + 4]);
        }
    }

    RgbaFrame::new(target.width, target.height, data)
}

fn encode_jpeg(frame: &RgbaFrame, quality: u8) -> CaptureResult<Vec<u8>> {
    let width = u16::try_from(frame.width)
        .map_err(|_| CaptureError::Encoding(format!("width {} too large for JPEG", frame.width)))?;
    let height = u16::try_from(frame.height).map_err(|_| {
        CaptureError::Encoding(format!("height {} too large for JPEG", frame.height))
    })?;

    let mut out = Vec::new();
    let encoder = jpeg_encoder::Encoder::new(&mut out, quality);
    encoder
        .encode(&frame.data, width, height, jpeg_encoder::ColorType::Rgba)
        .map_err(|e| CaptureError::Encoding(format!("JPEG encode error: {}", e)))?;
    Ok(out)
}

fn encode_png(frame: &RgbaFrame) -> CaptureResult<Vec<u8>> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, frame.width, frame.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| CaptureError::Encoding(format!("PNG header error: {}", e)))?;
        writer
            .write_image_data(&frame.data)
            .map_err(|e| CaptureError::Encoding(format!("PNG encode error: {}", e)))?;
    }
    Ok(out)
}
