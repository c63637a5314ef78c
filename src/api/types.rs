//! Wire types for the recognition service
//!
//! Request and response bodies exchanged with the backend, plus the decoded
//! recognition result handed to the rest of the client.

use crate::media::AudioClip;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Result type for API calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Body of `POST /recognize-gesture`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizeRequest {
    /// Data URL of the encoded frame
    pub frame: String,
}

/// Response of `POST /recognize-gesture`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecognizeResponse {
    pub success: bool,

    #[serde(default)]
    pub is_final: bool,

    #[serde(default)]
    pub gesture: Option<String>,

    #[serde(default)]
    pub urdu_text: Option<String>,

    /// Base64 encoded MP3
    #[serde(default)]
    pub audio: Option<String>,

    #[serde(default)]
    pub interim: Option<String>,
}

/// Body of `POST /text-to-sign`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextToSignRequest {
    pub text: String,
}

/// One entry of a sign sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignItem {
    /// Word the clip signs
    pub word: String,

    /// Media reference, absolute or relative to the media base
    pub url: String,
}

/// Response of `POST /text-to-sign`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextToSignResponse {
    pub success: bool,

    /// Absent when the backend reports failure
    #[serde(default)]
    pub sequence: Vec<SignItem>,
}

/// Decoded recognition result
#[derive(Debug, Clone, PartialEq)]
pub enum RecognitionResult {
    /// Gesture sequence still in progress
    Interim {
        /// Normalized label, e.g. `GOOD MORNING`
        label: String,
    },
    /// Completed recognition
    Final {
        gesture: String,
        translation: String,
        audio: Option<AudioClip>,
    },
}

impl RecognitionResult {
    /// Decode a response into a result
    ///
    /// Returns `Ok(None)` for an unsuccessful response, which carries nothing
    /// to render.
    pub fn from_response(response: RecognizeResponse) -> ApiResult<Option<Self>> {
        if !response.success {
            return Ok(None);
        }

        if response.is_final {
            return Ok(Some(Self::Final {
                gesture: response.gesture.unwrap_or_default(),
                translation: response.urdu_text.unwrap_or_default(),
                audio: response
                    .audio
                    .filter(|a| !a.is_empty())
                    .map(AudioClip::new),
            }));
        }

        let interim = response
            .interim
            .ok_or_else(|| ApiError::Malformed("interim result without label".to_string()))?;

        Ok(Some(Self::Interim {
            label: normalize_label(&interim),
        }))
    }
}

/// Upper-case a raw gesture label and join its tokens with spaces
pub fn normalize_label(raw: &str) -> String {
    raw.to_uppercase().replace('_', " ")
}
