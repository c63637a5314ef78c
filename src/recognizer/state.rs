//! Capture session state
//!
//! Defines the capture state machine, session tracking, and the events the
//! loop publishes for rendering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Current state of the capture loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureState {
    /// No session
    #[default]
    Idle,
    /// Uploading frames
    Running,
}

/// One start/stop cycle of the capture loop
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureSession {
    /// Session ID
    pub id: Uuid,

    /// Frame source the session owns
    pub source_id: String,

    /// When the session started
    pub started_at: DateTime<Utc>,

    /// When the session ended
    pub ended_at: Option<DateTime<Utc>>,
}

impl CaptureSession {
    /// Create a new session starting now
    pub fn new(source_id: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_id: source_id.to_string(),
            started_at: Utc::now(),
            ended_at: None,
        }
    }

    /// End the session
    pub fn end(&mut self) {
        self.ended_at = Some(Utc::now());
    }

    /// Duration so far, or total once ended, in milliseconds
    pub fn duration_ms(&self) -> i64 {
        let end = self.ended_at.unwrap_or_else(Utc::now);
        (end - self.started_at).num_milliseconds()
    }
}

/// Events published by the capture loop
#[derive(Debug, Clone, PartialEq)]
pub enum RecognitionEvent {
    /// Session started
    Started { session_id: Uuid },
    /// Partial label while the user is still signing
    Interim { label: String },
    /// Completed recognition
    Final {
        gesture: String,
        translation: String,
        has_audio: bool,
    },
    /// Session stopped
    Stopped { session_id: Uuid },
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No active source
    NoSource,
    /// Held by the explicit hold flag
    Held,
    /// Previous request still pending
    InFlight,
    /// Frame grab or encoding failed
    Failed,
    /// Request issued
    Sent,
}

/// Tick counters for a capture loop
#[derive(Debug, Default)]
pub struct CaptureStats {
    ticks: AtomicU64,
    sent: AtomicU64,
    skipped: AtomicU64,
    failures: AtomicU64,
}

/// Point-in-time copy of [`CaptureStats`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatsSnapshot {
    pub ticks: u64,
    pub sent: u64,
    pub skipped: u64,
    pub failures: u64,
}

impl CaptureStats {
    pub(crate) fn record(&self, outcome: TickOutcome) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
        let counter = match outcome {
            TickOutcome::Sent => &self.sent,
            TickOutcome::Failed => &self.failures,
            TickOutcome::NoSource | TickOutcome::Held | TickOutcome::InFlight => &self.skipped,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a request that failed after being sent
    pub(crate) fn record_request_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            ticks: self.ticks.load(Ordering::Relaxed),
            sent: self.sent.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn reset(&self) {
        self.ticks.store(0, Ordering::Relaxed);
        self.sent.store(0, Ordering::Relaxed);
        self.skipped.store(0, Ordering::Relaxed);
        self.failures.store(0, Ordering::Relaxed);
    }
}
