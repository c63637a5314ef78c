//! Gesture recognition loop
//!
//! This module implements the camera side of the client:
//! - CaptureLoop to sample, encode and upload frames on a timer
//! - Session state, tick statistics and the events rendered by the UI

pub mod coordinator;
pub mod state;

pub use coordinator::CaptureLoop;
pub use state::{CaptureSession, CaptureState, RecognitionEvent, StatsSnapshot, TickOutcome};
