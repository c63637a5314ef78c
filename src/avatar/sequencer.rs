//! Sign playback sequencer
//!
//! Turns text into an ordered list of sign clips and plays them strictly one
//! after another. A clip that fails to play counts as finished.

use super::state::{AvatarError, AvatarEvent, AvatarResult, AvatarState};
use crate::api::SignApi;
use crate::media::{MediaBase, MediaOutcome, MediaPlayer};
use crate::utils::busy::BusyFlag;
use crate::utils::error::Notice;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Plays sign sequences for text
pub struct AvatarSequencer {
    api: Arc<dyn SignApi>,
    player: Arc<dyn MediaPlayer>,
    media_base: MediaBase,
    busy: BusyFlag,
    state: Arc<RwLock<AvatarState>>,
    event_tx: broadcast::Sender<AvatarEvent>,
}

impl AvatarSequencer {
    pub fn new(api: Arc<dyn SignApi>, player: Arc<dyn MediaPlayer>, media_base: MediaBase) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        Self {
            api,
            player,
            media_base,
            busy: BusyFlag::new(),
            state: Arc::new(RwLock::new(AvatarState::Idle)),
            event_tx,
        }
    }

    /// The sequencer's busy flag
    ///
    /// Raised for the whole of a [`play`](Self::play) call. Hand it to the
    /// capture loop as a hold flag to pause uploads during playback.
    pub fn busy_flag(&self) -> BusyFlag {
        self.busy.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_set()
    }

    pub fn state(&self) -> AvatarState {
        *self.state.read()
    }

    /// Subscribe to avatar events
    pub fn subscribe(&self) -> broadcast::Receiver<AvatarEvent> {
        self.event_tx.subscribe()
    }

    fn set_state(&self, state: AvatarState) {
        *self.state.write() = state;
    }

    fn emit(&self, event: AvatarEvent) {
        let _ = self.event_tx.send(event);
    }

    /// Look up and play the signs for `text`
    ///
    /// Returns the number of clips played. Blank text is a no-op. Lookup
    /// failures are reported to the user as a notice and returned as errors.
    pub async fn play(&self, text: &str) -> AvatarResult<usize> {
        if text.trim().is_empty() {
            return Ok(0);
        }

        let _guard = self.busy.try_acquire().ok_or(AvatarError::Busy)?;

        self.set_state(AvatarState::Interpreting);
        self.emit(AvatarEvent::Interpreting);

        let response = match self.api.text_to_sign(text).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Text-to-sign request failed: {}", e);
                self.set_state(AvatarState::Idle);
                self.emit(AvatarEvent::Notice(Notice::ServerError));
                return Err(AvatarError::Server(e));
            }
        };

        if !response.success || response.sequence.is_empty() {
            tracing::info!("No signs found for {:?}", text);
            self.set_state(AvatarState::Idle);
            self.emit(AvatarEvent::Notice(Notice::SignNotFound));
            return Err(AvatarError::NotFound);
        }

        let total = response.sequence.len();
        self.set_state(AvatarState::Playing);

        for (index, item) in response.sequence.iter().enumerate() {
            let label = item.word.to_uppercase();
            let url = self.media_base.resolve(&item.url);
            self.emit(AvatarEvent::Sign {
                index,
                total,
                label: label.clone(),
            });

            match self.player.play_video(&url, &label).wait().await {
                MediaOutcome::Ended => {}
                MediaOutcome::Failed(reason) => {
                    tracing::debug!("Sign clip {} failed, advancing: {}", url, reason);
                }
            }
        }

        self.set_state(AvatarState::Complete);
        self.emit(AvatarEvent::Complete { played: total });
        tracing::info!("Played {} sign(s)", total);

        Ok(total)
    }
}
