//! Sign avatar
//!
//! Plays the signed translation of a piece of text as a sequence of short
//! video clips.

pub mod sequencer;
pub mod state;

pub use sequencer::AvatarSequencer;
pub use state::{AvatarError, AvatarEvent, AvatarResult, AvatarState};
