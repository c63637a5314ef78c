//! Command handlers
//!
//! This module contains the user actions exposed by the client. Each handler
//! takes the shared [`AppState`] and reports user-facing problems as
//! [`AppEvent::Notice`] in addition to its return value.

pub mod avatar;
pub mod camera;
pub mod voice;

use crate::api::{HttpSignApi, SignApi};
use crate::avatar::AvatarSequencer;
use crate::capture::{FrameEncoder, FrameSource};
use crate::config::ClientConfig;
use crate::media::{AudioCache, FfplayPlayer, MediaBase, MediaPlayer};
use crate::recognizer::CaptureLoop;
use crate::utils::error::{AppError, AppResult, Notice};
use crate::voice::{TextField, VoiceInput};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};

/// Opens the frame source for a new capture session
pub type SourceOpener = Box<dyn Fn() -> crate::capture::CaptureResult<Box<dyn FrameSource>> + Send + Sync>;

/// Application-level events not owned by a single component
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Transient status line, e.g. "Listening..."
    Status(String),
    /// Alert for the user
    Notice(Notice),
}

/// Application state shared by all commands
pub struct AppState {
    pub config: ClientConfig,
    pub capture: Arc<Mutex<CaptureLoop>>,
    pub avatar: Arc<AvatarSequencer>,
    pub voice: Option<VoiceInput>,
    pub text: TextField,
    player: Arc<dyn MediaPlayer>,
    audio: AudioCache,
    source_opener: Arc<SourceOpener>,
    event_tx: broadcast::Sender<AppEvent>,
}

impl AppState {
    /// Wire the components together
    pub fn new(config: ClientConfig, api: Arc<dyn SignApi>, player: Arc<dyn MediaPlayer>) -> Self {
        let encoder = FrameEncoder::new(
            config.capture.frame_resolution(),
            config.capture.format,
            config.capture.jpeg_quality,
        );
        let capture = CaptureLoop::new(
            api.clone(),
            player.clone(),
            encoder,
            Duration::from_millis(config.capture.interval_ms.max(1)),
        );
        let avatar = AvatarSequencer::new(
            api,
            player.clone(),
            MediaBase::parse(&config.avatar.media_base),
        );

        if config.capture.pause_during_playback {
            capture.set_hold(Some(avatar.busy_flag()));
        }

        let audio = capture.audio_cache();
        let source_config = config.capture.clone();
        let source_opener: SourceOpener = Box::new(move || {
            crate::capture::open_source(
                source_config.source,
                source_config.device.as_deref(),
                source_config.camera_resolution(),
            )
        });
        let (event_tx, _) = broadcast::channel(100);

        Self {
            config,
            capture: Arc::new(Mutex::new(capture)),
            avatar: Arc::new(avatar),
            voice: None,
            text: TextField::new(),
            player,
            audio,
            source_opener: Arc::new(source_opener),
            event_tx,
        }
    }

    /// Build the production stack from configuration
    pub fn from_config(config: ClientConfig) -> AppResult<Self> {
        let api = Arc::new(HttpSignApi::from_config(&config.api)?);
        let player = Arc::new(FfplayPlayer::new(config.media.player.clone()));
        let voice = VoiceInput::detect(&config.voice);
        Ok(Self::new(config, api, player).with_voice(voice))
    }

    /// Attach (or detach) voice input
    pub fn with_voice(mut self, voice: Option<VoiceInput>) -> Self {
        self.voice = voice;
        self
    }

    /// Replace how capture sources are opened
    pub fn with_source_opener(mut self, opener: SourceOpener) -> Self {
        self.source_opener = Arc::new(opener);
        self
    }

    /// Subscribe to application events
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.event_tx.subscribe()
    }

    pub(crate) fn emit(&self, event: AppEvent) {
        let _ = self.event_tx.send(event);
    }

    pub(crate) fn notify(&self, notice: Notice) {
        tracing::debug!("Notice: {}", notice);
        self.emit(AppEvent::Notice(notice));
    }

    /// Alert the user about `error` if it has a notice, and hand it back
    pub(crate) fn report(&self, error: impl Into<AppError>) -> AppError {
        let error = error.into();
        if let Some(notice) = error.notice() {
            self.notify(notice);
        }
        error
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::capture::SourceKind;
    use crate::testing::{MockApi, RecordingPlayer};

    pub fn state(api: Arc<MockApi>, player: Arc<RecordingPlayer>) -> AppState {
        let mut config = ClientConfig::default();
        config.capture.source = SourceKind::Pattern;
        config.capture.camera_width = 64;
        config.capture.camera_height = 48;
        config.avatar.media_base = "http://localhost:8080/".to_string();
        AppState::new(config, api, player)
    }
}
