//! Avatar playback state

use crate::api::ApiError;
use crate::utils::error::Notice;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Avatar errors
#[derive(Error, Debug)]
pub enum AvatarError {
    #[error("A sign sequence is already playing")]
    Busy,

    #[error("No signs found for the text")]
    NotFound,

    #[error("Text-to-sign request failed: {0}")]
    Server(#[from] ApiError),
}

/// Result type for avatar operations
pub type AvatarResult<T> = Result<T, AvatarError>;

/// What the avatar surface currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvatarState {
    /// Nothing requested yet, or the last request failed
    #[default]
    Idle,
    /// Waiting for the text-to-sign lookup
    Interpreting,
    /// Playing a clip
    Playing,
    /// Last sequence played to the end
    Complete,
}

/// Events published by the sequencer
#[derive(Debug, Clone, PartialEq)]
pub enum AvatarEvent {
    /// Lookup in progress
    Interpreting,
    /// Clip `index` of `total` started
    Sign {
        index: usize,
        total: usize,
        label: String,
    },
    /// Whole sequence played
    Complete { played: usize },
    /// Alert for the user
    Notice(Notice),
}
