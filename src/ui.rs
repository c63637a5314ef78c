//! Terminal rendering
//!
//! Turns component events into the lines shown to the user.

use crate::avatar::AvatarEvent;
use crate::commands::AppEvent;
use crate::recognizer::RecognitionEvent;

/// Prompt shown under an interim label
pub const CONTINUE_PROMPT: &str = "Drop hands to finish...";

/// Text for a recognition event, if it shows anything
pub fn render_recognition(event: &RecognitionEvent) -> Option<String> {
    match event {
        RecognitionEvent::Started { .. } => Some("Camera on".to_string()),
        RecognitionEvent::Interim { label } => Some(format!("{}\n  {}", label, CONTINUE_PROMPT)),
        RecognitionEvent::Final {
            gesture,
            translation,
            has_audio,
        } => {
            let speaker = if *has_audio { " [audio]" } else { "" };
            Some(format!("\"{}\"{}\n  {}", gesture, speaker, translation))
        }
        RecognitionEvent::Stopped { .. } => Some("Camera off".to_string()),
    }
}

/// Text for an avatar event
pub fn render_avatar(event: &AvatarEvent) -> String {
    match event {
        AvatarEvent::Interpreting => "Interpreting...".to_string(),
        AvatarEvent::Sign {
            index,
            total,
            label,
        } => format!("SIGN: {} ({}/{})", label, index + 1, total),
        AvatarEvent::Complete { .. } => "Complete".to_string(),
        AvatarEvent::Notice(notice) => format!("! {}", notice),
    }
}

/// Text for an application event
pub fn render_app(event: &AppEvent) -> String {
    match event {
        AppEvent::Status(status) => status.clone(),
        AppEvent::Notice(notice) => format!("! {}", notice),
    }
}
