//! SignSpeak client - sign language translation, both ways.
//!
//! The camera side samples frames and uploads them to the recognition
//! service, rendering recognized text and playing the returned speech. The
//! avatar side turns typed or spoken text into a sequence of sign clips.

pub mod api;
pub mod avatar;
pub mod capture;
pub mod commands;
pub mod config;
pub mod media;
pub mod recognizer;
pub mod ui;
pub mod utils;
pub mod voice;

#[cfg(test)]
pub(crate) mod testing;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging
///
/// `RUST_LOG` wins over `default_level`.
pub fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("signspeak_client={default_level},signspeak={default_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
