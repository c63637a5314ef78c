//! Test doubles shared by unit tests

use crate::api::{ApiError, ApiResult, RecognizeResponse, SignApi, TextToSignResponse};
use crate::capture::{CaptureResult, FrameSource, RgbaFrame};
use crate::media::{AudioClip, MediaCompletion, MediaOutcome, MediaPlayer};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// Counts how often a [`CountingSource`] was released
#[derive(Clone, Default)]
pub struct ReleaseCounter(Arc<AtomicUsize>);

impl ReleaseCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Small solid-colour source that records releases
pub struct CountingSource {
    releases: ReleaseCounter,
}

impl CountingSource {
    pub fn new() -> (Self, ReleaseCounter) {
        let releases = ReleaseCounter::default();
        (
            Self {
                releases: releases.clone(),
            },
            releases,
        )
    }
}

impl FrameSource for CountingSource {
    fn id(&self) -> &str {
        "counting"
    }

    fn grab(&mut self) -> CaptureResult<RgbaFrame> {
        RgbaFrame::new(16, 12, vec![200; 16 * 12 * 4])
    }

    fn release(&mut self) {
        self.releases.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Scripted [`SignApi`]
#[derive(Default)]
pub struct MockApi {
    recognize_calls: AtomicUsize,
    recognize_response: Mutex<Option<RecognizeResponse>>,
    recognize_gate: Mutex<Option<Arc<Notify>>>,
    frames: Mutex<Vec<String>>,
    text_to_sign_response: Mutex<Option<TextToSignResponse>>,
    texts: Mutex<Vec<String>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer recognition calls with this response; `None` fails them
    pub fn set_recognize(&self, response: Option<RecognizeResponse>) {
        *self.recognize_response.lock() = response;
    }

    /// Block recognition calls until the returned handle is notified
    pub fn hold_recognize(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.recognize_gate.lock() = Some(gate.clone());
        gate
    }

    /// Answer text-to-sign calls with this response; `None` fails them
    pub fn set_text_to_sign(&self, response: Option<TextToSignResponse>) {
        *self.text_to_sign_response.lock() = response;
    }

    pub fn recognize_calls(&self) -> usize {
        self.recognize_calls.load(Ordering::SeqCst)
    }

    pub fn frames(&self) -> Vec<String> {
        self.frames.lock().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().clone()
    }
}

#[async_trait]
impl SignApi for MockApi {
    async fn recognize_gesture(&self, frame: &str) -> ApiResult<RecognizeResponse> {
        self.recognize_calls.fetch_add(1, Ordering::SeqCst);
        self.frames.lock().push(frame.to_string());

        let gate = self.recognize_gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let response = self.recognize_response.lock().clone();
        response.ok_or_else(|| ApiError::Malformed("connection refused".to_string()))
    }

    async fn text_to_sign(&self, text: &str) -> ApiResult<TextToSignResponse> {
        self.texts.lock().push(text.to_string());
        let response = self.text_to_sign_response.lock().clone();
        response.ok_or_else(|| ApiError::Malformed("connection refused".to_string()))
    }
}

/// Player that records what it was asked to play
///
/// Videos take `clip_length` to finish. Any URL containing `broken` fails.
pub struct RecordingPlayer {
    clip_length: Duration,
    videos: Mutex<Vec<(String, String)>>,
    audio: Mutex<Vec<AudioClip>>,
    playing: Arc<AtomicUsize>,
    max_playing: Arc<AtomicUsize>,
}

impl RecordingPlayer {
    pub fn new(clip_length: Duration) -> Self {
        Self {
            clip_length,
            videos: Mutex::new(Vec::new()),
            audio: Mutex::new(Vec::new()),
            playing: Arc::new(AtomicUsize::new(0)),
            max_playing: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// `(url, label)` pairs in play order
    pub fn videos(&self) -> Vec<(String, String)> {
        self.videos.lock().clone()
    }

    pub fn audio(&self) -> Vec<AudioClip> {
        self.audio.lock().clone()
    }

    /// Highest number of videos playing at once
    pub fn max_concurrent(&self) -> usize {
        self.max_playing.load(Ordering::SeqCst)
    }
}

impl MediaPlayer for RecordingPlayer {
    fn play_video(&self, url: &str, label: &str) -> MediaCompletion {
        self.videos.lock().push((url.to_string(), label.to_string()));

        let now_playing = self.playing.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_playing.fetch_max(now_playing, Ordering::SeqCst);

        let (completer, completion) = MediaCompletion::pair();
        let playing = self.playing.clone();
        let length = self.clip_length;
        let broken = url.contains("broken");
        tokio::spawn(async move {
            tokio::time::sleep(length).await;
            playing.fetch_sub(1, Ordering::SeqCst);
            completer.complete(if broken {
                MediaOutcome::Failed("unsupported codec".to_string())
            } else {
                MediaOutcome::Ended
            });
        });
        completion
    }

    fn play_audio(&self, clip: &AudioClip) -> MediaCompletion {
        self.audio.lock().push(clip.clone());
        MediaCompletion::resolved(MediaOutcome::Ended)
    }
}
