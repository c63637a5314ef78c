//! Media player abstraction
//!
//! Playback is fire-and-observe: starting a clip returns a [`MediaCompletion`]
//! that resolves exactly once, when the clip ends or fails.

use super::audio::AudioClip;
use tokio::sync::oneshot;

/// How a clip finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaOutcome {
    /// Played to the end
    Ended,
    /// Could not be played, or stopped abnormally
    Failed(String),
}

/// Single-shot completion of one clip
#[derive(Debug)]
pub struct MediaCompletion {
    rx: oneshot::Receiver<MediaOutcome>,
}

/// Sending half of a [`MediaCompletion`]
#[derive(Debug)]
pub struct MediaCompleter {
    tx: oneshot::Sender<MediaOutcome>,
}

impl MediaCompletion {
    /// Create a linked completer/completion pair
    pub fn pair() -> (MediaCompleter, Self) {
        let (tx, rx) = oneshot::channel();
        (MediaCompleter { tx }, Self { rx })
    }

    /// A completion that has already resolved
    pub fn resolved(outcome: MediaOutcome) -> Self {
        let (completer, completion) = Self::pair();
        completer.complete(outcome);
        completion
    }

    /// Wait for the clip to end or fail
    ///
    /// A completer dropped without reporting counts as a failure.
    pub async fn wait(self) -> MediaOutcome {
        self.rx
            .await
            .unwrap_or_else(|_| MediaOutcome::Failed("player went away".to_string()))
    }
}

impl MediaCompleter {
    pub fn complete(self, outcome: MediaOutcome) {
        let _ = self.tx.send(outcome);
    }
}

/// Something that can play sign videos and recognized audio
pub trait MediaPlayer: Send + Sync {
    /// Start playing a video muted, once, labelled with `label`
    fn play_video(&self, url: &str, label: &str) -> MediaCompletion;

    /// Start playing an audio clip
    fn play_audio(&self, clip: &AudioClip) -> MediaCompletion;
}
