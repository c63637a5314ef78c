//! Speech recognizers
//!
//! The shipped recognizer shells out to a program that records one utterance
//! and prints transcript candidates on stdout, best first, one per line.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

/// Voice input errors
#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("Speech recognition is not available")]
    Unavailable,

    #[error("Failed to run recognizer: {0}")]
    Io(#[from] std::io::Error),

    #[error("Recognizer exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("Recognizer timed out after {0}ms")]
    Timeout(u64),
}

/// Result type for voice operations
pub type VoiceResult<T> = Result<T, VoiceError>;

/// One-shot speech recognition
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Listen for a single utterance and return transcript candidates, best
    /// first
    async fn recognize(&self) -> VoiceResult<Vec<String>>;
}

/// Recognizer backed by an external program
#[derive(Debug, Clone)]
pub struct CommandRecognizer {
    program: PathBuf,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandRecognizer {
    pub fn new(program: PathBuf, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program,
            args,
            timeout,
        }
    }
}

/// Non-empty trimmed lines, in order
fn parse_candidates(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl SpeechRecognizer for CommandRecognizer {
    async fn recognize(&self) -> VoiceResult<Vec<String>> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| VoiceError::Timeout(self.timeout.as_millis() as u64))??;

        if !output.status.success() {
            return Err(VoiceError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(parse_candidates(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Locate an executable by name or path
///
/// Names without a path separator are searched for on `PATH`.
pub fn find_program(program: &str) -> Option<PathBuf> {
    if program.is_empty() {
        return None;
    }

    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .flat_map(|dir| {
            let plain = dir.join(program);
            let exe = dir.join(format!("{}.exe", program));
            [plain, exe]
        })
        .find(|p| p.is_file())
}
