//! Camera and recognized-audio commands

use super::AppState;
use crate::capture::CaptureError;
use crate::utils::error::{AppResult, Notice};
use uuid::Uuid;

/// Result of [`toggle_camera`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraToggle {
    Started(Uuid),
    Stopped,
}

/// Start recognition from the configured source, or stop it if running
///
/// Opening and releasing a webcam both block until the device answers, so
/// they run on the blocking pool.
pub async fn toggle_camera(state: &AppState) -> AppResult<CameraToggle> {
    let mut capture = state.capture.lock().await;

    if capture.is_running() {
        let (_, device) = capture.stop_detached();
        drop(capture);

        if let Some(mut device) = device {
            if let Err(e) = tokio::task::spawn_blocking(move || device.release()).await {
                tracing::warn!("Camera release task failed: {}", e);
            }
        }
        return Ok(CameraToggle::Stopped);
    }

    let opener = state.source_opener.clone();
    let opened = tokio::task::spawn_blocking(move || (**opener)())
        .await
        .map_err(|e| CaptureError::DeviceNotFound(format!("camera open task failed: {}", e)))
        .and_then(|result| result);

    let source = match opened {
        Ok(source) => source,
        Err(e) => {
            tracing::warn!("Failed to open camera: {}", e);
            return Err(state.report(e));
        }
    };

    let session = capture.start(source);
    Ok(CameraToggle::Started(session.id))
}

/// Play the last recognized audio again
///
/// Returns `false` (and notifies the user) when there is nothing to replay.
pub fn replay_audio(state: &AppState) -> bool {
    match state.audio.current() {
        Some(clip) => {
            drop(state.player.play_audio(&clip));
            true
        }
        None => {
            state.notify(Notice::NothingToReplay);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;
    use crate::commands::AppEvent;
    use crate::capture::FrameSource;
    use crate::media::AudioClip;
    use crate::testing::{CountingSource, MockApi, RecordingPlayer};
    use crate::utils::error::AppError;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_toggle_starts_and_stops() {
        let api = Arc::new(MockApi::new());
        let player = Arc::new(RecordingPlayer::new(Duration::from_millis(10)));
        let state = test_support::state(api.clone(), player);

        assert!(matches!(
            toggle_camera(&state).await.unwrap(),
            CameraToggle::Started(_)
        ));
        tokio::time::sleep(Duration::from_millis(450)).await;
        assert!(api.recognize_calls() >= 2);

        assert_eq!(toggle_camera(&state).await.unwrap(), CameraToggle::Stopped);
        assert!(!state.capture.lock().await.is_running());
    }

    #[tokio::test]
    async fn test_toggle_off_releases_device_once() {
        let api = Arc::new(MockApi::new());
        let player = Arc::new(RecordingPlayer::new(Duration::from_millis(10)));
        let (source, releases) = CountingSource::new();
        let slot = Mutex::new(Some(source));
        let state = test_support::state(api, player).with_source_opener(Box::new(move || {
            slot.lock()
                .take()
                .map(|source| Box::new(source) as Box<dyn FrameSource>)
                .ok_or_else(|| CaptureError::DeviceNotFound("already opened".to_string()))
        }));

        toggle_camera(&state).await.unwrap();
        assert_eq!(releases.count(), 0);

        assert_eq!(toggle_camera(&state).await.unwrap(), CameraToggle::Stopped);
        assert_eq!(releases.count(), 1);

        state.capture.lock().await.stop();
        assert_eq!(releases.count(), 1);
        assert!(!state.capture.lock().await.is_running());
    }

    #[tokio::test]
    async fn test_open_failure_notifies_camera_denied() {
        let api = Arc::new(MockApi::new());
        let player = Arc::new(RecordingPlayer::new(Duration::from_millis(10)));
        let state = test_support::state(api, player).with_source_opener(Box::new(|| {
            Err(CaptureError::PermissionDenied("user said no".to_string()))
        }));
        let mut events = state.subscribe();

        let result = toggle_camera(&state).await;
        assert!(matches!(
            result,
            Err(AppError::Capture(CaptureError::PermissionDenied(_)))
        ));
        assert_eq!(
            events.recv().await.unwrap(),
            AppEvent::Notice(Notice::CameraDenied)
        );
        assert!(!state.capture.lock().await.is_running());
    }

    #[tokio::test]
    async fn test_replay_without_audio_notifies() {
        let api = Arc::new(MockApi::new());
        let player = Arc::new(RecordingPlayer::new(Duration::from_millis(10)));
        let state = test_support::state(api, player.clone());
        let mut events = state.subscribe();

        assert!(!replay_audio(&state));
        assert_eq!(
            events.recv().await.unwrap(),
            AppEvent::Notice(Notice::NothingToReplay)
        );
        assert!(player.audio().is_empty());
    }

    #[tokio::test]
    async fn test_replay_plays_cached_audio() {
        let api = Arc::new(MockApi::new());
        let player = Arc::new(RecordingPlayer::new(Duration::from_millis(10)));
        let state = test_support::state(api, player.clone());
        state.audio.store(Some(AudioClip::new("SUQz")));

        assert!(replay_audio(&state));
        assert_eq!(player.audio()[0].base64(), "SUQz");
    }
}
