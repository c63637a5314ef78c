//! Client configuration
//!
//! Loaded from a TOML file. Every section has defaults, so a missing file or
//! a partial file is fine.

use crate::capture::{ImageFormat, Resolution, SourceKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Recognition service
    pub api: ApiConfig,
    /// Camera and frame upload
    pub capture: CaptureConfig,
    /// Sign playback
    pub avatar: AvatarConfig,
    /// Media player
    pub media: MediaConfig,
    /// Speech input
    pub voice: VoiceConfig,
    /// Logging
    pub logging: LoggingConfig,
}

/// Recognition service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL the endpoints hang off
    pub base_url: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

/// Capture loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Frame source: "webcam" or "pattern"
    pub source: SourceKind,
    /// Camera index or device path (first camera when unset)
    pub device: Option<String>,
    /// Resolution requested from the camera
    pub camera_width: u32,
    pub camera_height: u32,
    /// Upload period in milliseconds
    pub interval_ms: u64,
    /// Size frames are shrunk to before upload
    pub frame_width: u32,
    pub frame_height: u32,
    /// Upload compression
    pub format: ImageFormat,
    /// JPEG quality, 1-100
    pub jpeg_quality: u8,
    /// Pause uploads while the avatar is playing
    pub pause_during_playback: bool,
}

/// Avatar settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarConfig {
    /// URL or directory that relative sign clip paths resolve against
    pub media_base: String,
}

/// Media player settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Player executable
    pub player: String,
}

/// Speech input settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Program that listens once and prints transcript candidates, one per
    /// line. Voice input is disabled when empty or not found.
    pub program: String,
    /// Arguments passed to the program
    pub args: Vec<String>,
    /// Give up after this many milliseconds
    pub timeout_ms: u64,
}

/// Logging
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when RUST_LOG is unset
    pub level: String,
}

// ── Defaults ─────────────────────────────────────────────────────

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".into(),
            timeout_ms: 10_000,
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Webcam,
            device: None,
            camera_width: 640,
            camera_height: 480,
            interval_ms: 200,
            frame_width: 320,
            frame_height: 240,
            format: ImageFormat::Jpeg,
            jpeg_quality: 40,
            pause_during_playback: true,
        }
    }
}

impl CaptureConfig {
    pub fn camera_resolution(&self) -> Resolution {
        Resolution::new(self.camera_width, self.camera_height)
    }

    pub fn frame_resolution(&self) -> Resolution {
        Resolution::new(self.frame_width, self.frame_height)
    }
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            media_base: "frontend".into(),
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            player: "ffplay".into(),
        }
    }
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            program: String::new(),
            args: Vec::new(),
            timeout_ms: 15_000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

// ── Loading ──────────────────────────────────────────────────────

impl ClientConfig {
    /// Load from a TOML file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("invalid config {}: {e}; using defaults", path.display());
                Self::default()
            }),
            Err(_) => {
                tracing::info!("no config at {}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Write default config to a file
    pub fn write_default(path: &Path) -> std::io::Result<()> {
        let text = toml::to_string_pretty(&Self::default())
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, text)
    }
}
