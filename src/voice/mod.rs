//! Voice input
//!
//! Fills the text field from a single speech-recognition attempt. The
//! capability is probed once at startup; without a recognizer there is simply
//! no [`VoiceInput`].

pub mod recognizer;

pub use recognizer::{CommandRecognizer, SpeechRecognizer, VoiceError, VoiceResult};

use crate::config::VoiceConfig;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

/// Shared, editable text input
#[derive(Debug, Clone, Default)]
pub struct TextField {
    inner: Arc<RwLock<String>>,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> String {
        self.inner.read().clone()
    }

    /// Replace the whole contents
    pub fn set(&self, text: impl Into<String>) {
        *self.inner.write() = text.into();
    }
}

/// Speech-to-text bridge into a [`TextField`]
pub struct VoiceInput {
    recognizer: Arc<dyn SpeechRecognizer>,
}

impl VoiceInput {
    pub fn new(recognizer: Arc<dyn SpeechRecognizer>) -> Self {
        Self { recognizer }
    }

    /// Probe for the configured recognizer program
    pub fn detect(config: &VoiceConfig) -> Option<Self> {
        let Some(program) = recognizer::find_program(&config.program) else {
            if !config.program.is_empty() {
                tracing::warn!("Speech recognizer '{}' not found", config.program);
            }
            tracing::info!("Voice input unavailable");
            return None;
        };

        tracing::info!("Voice input using {}", program.display());
        Some(Self::new(Arc::new(CommandRecognizer::new(
            program,
            config.args.clone(),
            Duration::from_millis(config.timeout_ms),
        ))))
    }

    /// Listen once and overwrite `field` with the best candidate
    ///
    /// Returns the transcript written, or `None` when nothing was heard; the
    /// field is left untouched in that case.
    pub async fn listen(&self, field: &TextField) -> VoiceResult<Option<String>> {
        let candidates = self.recognizer.recognize().await?;
        let Some(best) = candidates.into_iter().next() else {
            tracing::debug!("Recognizer heard nothing");
            return Ok(None);
        };

        tracing::debug!("Heard {:?}", best);
        field.set(best.clone());
        Ok(Some(best))
    }
}
