//! Voice input command

use super::{AppEvent, AppState};
use crate::utils::error::AppResult;
use crate::voice::VoiceError;

/// Listen once and fill the text field
///
/// Returns what was heard, if anything. A missing recognizer and a failed
/// recording are both reported to the user.
pub async fn listen(state: &AppState) -> AppResult<Option<String>> {
    let Some(voice) = &state.voice else {
        return Err(state.report(VoiceError::Unavailable));
    };

    state.emit(AppEvent::Status("Listening...".to_string()));
    voice.listen(&state.text).await.map_err(|e| {
        tracing::warn!("Speech recognition failed: {}", e);
        state.report(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;
    use crate::testing::{MockApi, RecordingPlayer};
    use crate::utils::error::{AppError, Notice};
    use crate::voice::{SpeechRecognizer, VoiceInput, VoiceResult};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;

    struct Hears(&'static str);

    struct NoMicrophone;

    #[async_trait]
    impl SpeechRecognizer for NoMicrophone {
        async fn recognize(&self) -> VoiceResult<Vec<String>> {
            Err(VoiceError::Failed {
                status: "exit status: 1".to_string(),
                stderr: "microphone permission denied".to_string(),
            })
        }
    }

    #[async_trait]
    impl SpeechRecognizer for Hears {
        async fn recognize(&self) -> VoiceResult<Vec<String>> {
            Ok(vec![self.0.to_string()])
        }
    }

    #[tokio::test]
    async fn test_listen_fills_text_field() {
        let api = Arc::new(MockApi::new());
        let player = Arc::new(RecordingPlayer::new(Duration::from_millis(10)));
        let state = test_support::state(api, player)
            .with_voice(Some(VoiceInput::new(Arc::new(Hears("are you ready")))));
        let mut events = state.subscribe();

        let heard = listen(&state).await.unwrap();
        assert_eq!(heard.as_deref(), Some("are you ready"));
        assert_eq!(state.text.get(), "are you ready");
        assert_eq!(
            events.recv().await.unwrap(),
            AppEvent::Status("Listening...".to_string())
        );
    }

    #[tokio::test]
    async fn test_listen_without_voice_is_inert() {
        let api = Arc::new(MockApi::new());
        let player = Arc::new(RecordingPlayer::new(Duration::from_millis(10)));
        let state = test_support::state(api, player);
        state.text.set("unchanged");
        let mut events = state.subscribe();

        assert!(matches!(
            listen(&state).await,
            Err(AppError::Voice(VoiceError::Unavailable))
        ));
        assert_eq!(state.text.get(), "unchanged");
        assert_eq!(
            events.recv().await.unwrap(),
            AppEvent::Notice(Notice::VoiceUnavailable)
        );
    }

    #[tokio::test]
    async fn test_recognizer_failure_notifies_microphone() {
        let api = Arc::new(MockApi::new());
        let player = Arc::new(RecordingPlayer::new(Duration::from_millis(10)));
        let state = test_support::state(api, player)
            .with_voice(Some(VoiceInput::new(Arc::new(NoMicrophone))));
        state.text.set("keep me");
        let mut events = state.subscribe();

        assert!(matches!(
            listen(&state).await,
            Err(AppError::Voice(VoiceError::Failed { .. }))
        ));
        assert_eq!(state.text.get(), "keep me");
        assert_eq!(
            events.recv().await.unwrap(),
            AppEvent::Status("Listening...".to_string())
        );
        assert_eq!(
            events.recv().await.unwrap(),
            AppEvent::Notice(Notice::MicrophoneFailed)
        );
    }
}
