//! Media playback
//!
//! Audio returned by the recognizer and the sign clips played by the avatar
//! both go through a [`MediaPlayer`].

pub mod audio;
pub mod ffplay;
pub mod player;
pub mod resolve;

pub use audio::{AudioCache, AudioClip};
pub use ffplay::FfplayPlayer;
pub use player::{MediaCompleter, MediaCompletion, MediaOutcome, MediaPlayer};
pub use resolve::MediaBase;
