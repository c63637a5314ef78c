//! Capture loop
//!
//! Samples the active frame source on a fixed period, uploads a downsampled
//! frame, and publishes the recognition result.
//!
//! Ticks never queue. A tick is dropped when there is no source, when the
//! previous upload is still in flight, or when the hold flag is raised. Upload
//! failures are dropped too; the next tick simply tries again.

use super::state::{
    CaptureSession, CaptureState, CaptureStats, RecognitionEvent, StatsSnapshot, TickOutcome,
};
use crate::api::{RecognitionResult, SignApi};
use crate::capture::{CaptureDevice, FrameEncoder, FrameSource};
use crate::media::{AudioCache, MediaPlayer};
use crate::utils::busy::BusyFlag;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// State shared between the loop handle, the ticker task and request tasks
struct LoopShared {
    api: Arc<dyn SignApi>,
    player: Arc<dyn MediaPlayer>,
    audio: AudioCache,
    encoder: FrameEncoder,
    device: Mutex<Option<CaptureDevice>>,
    in_flight: BusyFlag,
    hold: RwLock<Option<BusyFlag>>,
    stats: CaptureStats,
    event_tx: broadcast::Sender<RecognitionEvent>,
}

impl LoopShared {
    fn tick(self: &Arc<Self>) -> TickOutcome {
        let outcome = self.try_tick();
        self.stats.record(outcome);
        outcome
    }

    fn try_tick(self: &Arc<Self>) -> TickOutcome {
        let mut slot = self.device.lock();
        let Some(device) = slot.as_mut() else {
            return TickOutcome::NoSource;
        };

        if self.hold.read().as_ref().is_some_and(|h| h.is_set()) {
            return TickOutcome::Held;
        }

        let Some(guard) = self.in_flight.try_acquire() else {
            return TickOutcome::InFlight;
        };

        let frame = match device.grab() {
            Ok(frame) => frame,
            Err(e) => {
                tracing::debug!("Skipping tick, no frame from {}: {}", device.id(), e);
                return TickOutcome::Failed;
            }
        };

        let data_url = match self.encoder.encode(&frame) {
            Ok(encoded) => encoded.to_data_url(),
            Err(e) => {
                tracing::debug!("Skipping tick, frame encoding failed: {}", e);
                return TickOutcome::Failed;
            }
        };

        let shared = self.clone();
        tokio::spawn(async move {
            // Held until the response is handled
            let _guard = guard;

            let result = shared
                .api
                .recognize_gesture(&data_url)
                .await
                .and_then(RecognitionResult::from_response);

            match result {
                Ok(Some(result)) => shared.render(result),
                Ok(None) => {}
                Err(e) => {
                    shared.stats.record_request_failure();
                    tracing::debug!("Dropping recognition tick: {}", e);
                }
            }
        });

        TickOutcome::Sent
    }

    fn render(&self, result: RecognitionResult) {
        let event = match result {
            RecognitionResult::Interim { label } => {
                tracing::debug!("Interim recognition: {}", label);
                RecognitionEvent::Interim { label }
            }
            RecognitionResult::Final {
                gesture,
                translation,
                audio,
            } => {
                tracing::info!("Recognized \"{}\"", gesture);
                if let Some(clip) = &audio {
                    // Fire and forget
                    drop(self.player.play_audio(clip));
                }
                let has_audio = audio.is_some();
                self.audio.store(audio);
                RecognitionEvent::Final {
                    gesture,
                    translation,
                    has_audio,
                }
            }
        };
        let _ = self.event_tx.send(event);
    }
}

/// Periodic frame upload loop
pub struct CaptureLoop {
    shared: Arc<LoopShared>,
    period: Duration,
    state: CaptureState,
    session: Option<CaptureSession>,
    task: Option<JoinHandle<()>>,
}

impl CaptureLoop {
    /// Create an idle capture loop
    pub fn new(
        api: Arc<dyn SignApi>,
        player: Arc<dyn MediaPlayer>,
        encoder: FrameEncoder,
        period: Duration,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        Self {
            shared: Arc::new(LoopShared {
                api,
                player,
                audio: AudioCache::new(),
                encoder,
                device: Mutex::new(None),
                in_flight: BusyFlag::new(),
                hold: RwLock::new(None),
                stats: CaptureStats::default(),
                event_tx,
            }),
            period,
            state: CaptureState::Idle,
            session: None,
            task: None,
        }
    }

    /// Skip ticks while `hold` is raised
    ///
    /// Typically the avatar's busy flag, so frames are not uploaded during
    /// sign playback.
    pub fn set_hold(&self, hold: Option<BusyFlag>) {
        *self.shared.hold.write() = hold;
    }

    /// Get the current capture state
    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == CaptureState::Running
    }

    /// The active session, if any
    pub fn session(&self) -> Option<&CaptureSession> {
        self.session.as_ref()
    }

    /// Last recognized audio, for replay
    pub fn audio_cache(&self) -> AudioCache {
        self.shared.audio.clone()
    }

    /// Whether an upload is pending
    pub fn in_flight(&self) -> bool {
        self.shared.in_flight.is_set()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.shared.stats.snapshot()
    }

    /// Subscribe to recognition events
    pub fn subscribe(&self) -> broadcast::Receiver<RecognitionEvent> {
        self.shared.event_tx.subscribe()
    }

    /// Start uploading frames from `source`
    ///
    /// An active session is stopped first and its source released.
    pub fn start(&mut self, source: Box<dyn FrameSource>) -> &CaptureSession {
        if self.is_running() {
            tracing::info!("Replacing active capture session");
            self.stop();
        }

        let device = CaptureDevice::new(source);
        let session = CaptureSession::new(device.id());
        *self.shared.device.lock() = Some(device);
        self.shared.stats.reset();

        let shared = self.shared.clone();
        let period = self.period;
        self.task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let outcome = shared.tick();
                tracing::trace!("Capture tick: {:?}", outcome);
            }
        }));

        tracing::info!(
            "Capture session {} started on {} every {}ms",
            session.id,
            session.source_id,
            self.period.as_millis()
        );

        let _ = self.shared.event_tx.send(RecognitionEvent::Started {
            session_id: session.id,
        });
        self.state = CaptureState::Running;
        self.session.insert(session)
    }

    /// Stop uploading and release the source
    ///
    /// Returns the session that was stopped; calling again does nothing.
    pub fn stop(&mut self) -> Option<CaptureSession> {
        let (session, device) = self.stop_detached();
        if let Some(mut device) = device {
            device.release();
        }
        session
    }

    /// Stop uploading and hand the device back unreleased
    ///
    /// For callers that must not block while a camera shuts down; the device
    /// still releases itself when dropped.
    pub fn stop_detached(&mut self) -> (Option<CaptureSession>, Option<CaptureDevice>) {
        if let Some(task) = self.task.take() {
            task.abort();
        }

        let device = self.shared.device.lock().take();
        self.state = CaptureState::Idle;
        (self.end_session(), device)
    }

    fn end_session(&mut self) -> Option<CaptureSession> {
        let mut session = self.session.take()?;
        session.end();

        let stats = self.stats();
        tracing::info!(
            "Capture session {} stopped after {}ms: {} ticks, {} sent, {} skipped, {} failed",
            session.id,
            session.duration_ms(),
            stats.ticks,
            stats.sent,
            stats.skipped,
            stats.failures
        );

        let _ = self.shared.event_tx.send(RecognitionEvent::Stopped {
            session_id: session.id,
        });
        Some(session)
    }
}

impl Drop for CaptureLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
