//! Error types and handling
//!
//! Common error types used across the application, and the user-facing
//! notices some of them turn into.

use crate::api::ApiError;
use crate::avatar::AvatarError;
use crate::capture::CaptureError;
use crate::voice::VoiceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Avatar error: {0}")]
    Avatar(#[from] AvatarError),

    #[error("Voice error: {0}")]
    Voice(#[from] VoiceError),
}

impl AppError {
    /// Stable error code for logs and status output
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Api(_) => "API_ERROR",
            AppError::Capture(CaptureError::PermissionDenied(_)) => "PERMISSION_DENIED",
            AppError::Capture(_) => "CAPTURE_ERROR",
            AppError::Avatar(AvatarError::NotFound) => "SIGN_NOT_FOUND",
            AppError::Avatar(_) => "AVATAR_ERROR",
            AppError::Voice(VoiceError::Unavailable) => "VOICE_UNAVAILABLE",
            AppError::Voice(_) => "VOICE_ERROR",
        }
    }

    /// The alert shown to the user for this error, if any
    pub fn notice(&self) -> Option<Notice> {
        match self {
            AppError::Capture(_) => Some(Notice::CameraDenied),
            AppError::Avatar(AvatarError::NotFound) => Some(Notice::SignNotFound),
            AppError::Avatar(AvatarError::Server(_)) => Some(Notice::ServerError),
            AppError::Voice(VoiceError::Unavailable) => Some(Notice::VoiceUnavailable),
            AppError::Voice(_) => Some(Notice::MicrophoneFailed),
            _ => None,
        }
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// User-facing alerts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// Camera could not be opened
    CameraDenied,
    /// Replay requested before anything was recognized
    NothingToReplay,
    /// Text has no sign clips
    SignNotFound,
    /// Text-to-sign request failed
    ServerError,
    /// No speech recognizer on this machine
    VoiceUnavailable,
    /// Speech recognizer ran but could not hear anything
    MicrophoneFailed,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Notice::CameraDenied => "Camera access denied",
            Notice::NothingToReplay => "Sign a sentence first!",
            Notice::SignNotFound => "Sign not found.",
            Notice::ServerError => "Server error.",
            Notice::VoiceUnavailable => "Voice input is not available.",
            Notice::MicrophoneFailed => "Microphone unavailable.",
        };
        f.write_str(text)
    }
}
