//! FFplay-backed media player
//!
//! Each clip runs in its own `ffplay` process. Process exit resolves the
//! clip's completion: a zero status is a natural end, anything else a failure.

use super::audio::AudioClip;
use super::player::{MediaCompleter, MediaCompletion, MediaOutcome, MediaPlayer};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};

/// Plays media through an external `ffplay` binary
#[derive(Debug, Clone)]
pub struct FfplayPlayer {
    program: String,
}

impl FfplayPlayer {
    /// Use the given player executable
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn video_args(url: &str, label: &str) -> Vec<String> {
        vec![
            "-autoexit".to_string(),  // Exit at end of stream
            "-an".to_string(),        // Muted
            "-loglevel".to_string(),
            "error".to_string(),
            "-window_title".to_string(),
            format!("SIGN: {}", label),
            url.to_string(),
        ]
    }

    fn audio_args() -> Vec<String> {
        vec![
            "-nodisp".to_string(),
            "-autoexit".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-i".to_string(),
            "pipe:0".to_string(),
        ]
    }

    fn spawn(&self, args: &[String], piped_stdin: bool) -> std::io::Result<Child> {
        Command::new(&self.program)
            .args(args)
            .stdin(if piped_stdin {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
    }
}

impl Default for FfplayPlayer {
    fn default() -> Self {
        Self::new("ffplay")
    }
}

async fn watch(mut child: Child, completer: MediaCompleter) {
    let outcome = match child.wait().await {
        Ok(status) if status.success() => MediaOutcome::Ended,
        Ok(status) => MediaOutcome::Failed(format!("player exited with {}", status)),
        Err(e) => MediaOutcome::Failed(e.to_string()),
    };
    completer.complete(outcome);
}

impl MediaPlayer for FfplayPlayer {
    fn play_video(&self, url: &str, label: &str) -> MediaCompletion {
        let child = match self.spawn(&Self::video_args(url, label), false) {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!("Failed to start {} for {}: {}", self.program, url, e);
                return MediaCompletion::resolved(MediaOutcome::Failed(e.to_string()));
            }
        };

        tracing::debug!("Playing video {} ({})", url, label);
        let (completer, completion) = MediaCompletion::pair();
        tokio::spawn(watch(child, completer));
        completion
    }

    fn play_audio(&self, clip: &AudioClip) -> MediaCompletion {
        let bytes = match clip.decode() {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Discarding undecodable audio clip: {}", e);
                return MediaCompletion::resolved(MediaOutcome::Failed(e.to_string()));
            }
        };

        let mut child = match self.spawn(&Self::audio_args(), true) {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!("Failed to start {} for audio: {}", self.program, e);
                return MediaCompletion::resolved(MediaOutcome::Failed(e.to_string()));
            }
        };

        let (completer, completion) = MediaCompletion::pair();
        let stdin = child.stdin.take();
        tokio::spawn(async move {
            if let Some(mut stdin) = stdin {
                if let Err(e) = stdin.write_all(&bytes).await {
                    tracing::debug!("Audio pipe closed early: {}", e);
                }
                // Close stdin to signal EOF
                drop(stdin);
            }
            watch(child, completer).await;
        });

        tracing::debug!("Playing {} bytes of audio", clip.base64().len() * 3 / 4);
        completion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_args_are_muted_and_single_shot() {
        let args = FfplayPlayer::video_args("assets/signs/what.mp4", "WHAT");
        assert!(args.contains(&"-an".to_string()));
        assert!(args.contains(&"-autoexit".to_string()));
        assert!(!args.iter().any(|a| a == "-loop"));
        assert!(args.contains(&"SIGN: WHAT".to_string()));
        assert_eq!(args.last().unwrap(), "assets/signs/what.mp4");
    }

    #[tokio::test]
    async fn test_missing_player_fails_instead_of_hanging() {
        let player = FfplayPlayer::new("signspeak-definitely-not-a-player");
        let outcome = player.play_video("clip.mp4", "CLIP").wait().await;
        assert!(matches!(outcome, MediaOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn test_undecodable_audio_fails() {
        let player = FfplayPlayer::default();
        let outcome = player.play_audio(&AudioClip::new("%%%")).wait().await;
        assert!(matches!(outcome, MediaOutcome::Failed(_)));
    }
}
