//! Avatar command

use super::AppState;
use crate::utils::error::AppResult;

/// Play the signs for `text`, or for the text field when `text` is `None`
///
/// Returns the number of clips played. The sequencer reports lookup failures
/// to the user through its own events.
pub async fn sign(state: &AppState, text: Option<&str>) -> AppResult<usize> {
    let text = match text {
        Some(text) => {
            state.text.set(text);
            text.trim().to_string()
        }
        None => state.text.get().trim().to_string(),
    };

    Ok(state.avatar.play(&text).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{SignItem, TextToSignResponse};
    use crate::avatar::AvatarError;
    use crate::commands::test_support;
    use crate::testing::{CountingSource, MockApi, RecordingPlayer};
    use crate::utils::error::AppError;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_sign_uses_trimmed_text_field() {
        let api = Arc::new(MockApi::new());
        api.set_text_to_sign(Some(TextToSignResponse {
            success: true,
            sequence: vec![SignItem {
                word: "thankyou".to_string(),
                url: "assets/signs/thankyou.mp4".to_string(),
            }],
        }));
        let player = Arc::new(RecordingPlayer::new(Duration::from_millis(100)));
        let state = test_support::state(api.clone(), player.clone());
        state.text.set("  thank you  ");

        assert_eq!(sign(&state, None).await.unwrap(), 1);
        assert_eq!(api.texts(), vec!["thank you".to_string()]);
        assert_eq!(
            player.videos()[0].0,
            "http://localhost:8080/assets/signs/thankyou.mp4"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_field_does_nothing() {
        let api = Arc::new(MockApi::new());
        let player = Arc::new(RecordingPlayer::new(Duration::from_millis(100)));
        let state = test_support::state(api.clone(), player);

        assert_eq!(sign(&state, None).await.unwrap(), 0);
        assert!(api.texts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_found_surfaces_as_error() {
        let api = Arc::new(MockApi::new());
        api.set_text_to_sign(Some(TextToSignResponse {
            success: true,
            sequence: vec![],
        }));
        let player = Arc::new(RecordingPlayer::new(Duration::from_millis(100)));
        let state = test_support::state(api, player);

        let result = sign(&state, Some("qwerty")).await;
        assert!(matches!(result, Err(AppError::Avatar(AvatarError::NotFound))));
        assert_eq!(state.text.get(), "qwerty");
    }

    #[tokio::test(start_paused = true)]
    async fn test_capture_holds_during_playback() {
        let api = Arc::new(MockApi::new());
        api.set_text_to_sign(Some(TextToSignResponse {
            success: true,
            sequence: vec![SignItem {
                word: "welcome".to_string(),
                url: "assets/signs/welcome.mp4".to_string(),
            }],
        }));
        let player = Arc::new(RecordingPlayer::new(Duration::from_millis(2000)));
        let state = test_support::state(api.clone(), player);

        {
            let mut capture = state.capture.lock().await;
            let (source, _) = CountingSource::new();
            capture.start(Box::new(source));
        }

        let avatar = state.avatar.clone();
        let playback = tokio::spawn(async move { avatar.play("welcome").await });
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(state.avatar.is_busy());

        let calls = api.recognize_calls();
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(api.recognize_calls(), calls);

        assert_eq!(playback.await.unwrap().unwrap(), 1);
        tokio::time::sleep(Duration::from_millis(450)).await;
        assert!(api.recognize_calls() > calls);
    }
}
