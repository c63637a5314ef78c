//! SignSpeak terminal client.
//!
//! ```text
//! signspeak                      Run with signspeak.toml (or defaults)
//! signspeak --config <path>      Use custom config TOML
//! signspeak --gen-config         Write the default config to --config and exit
//! signspeak --source pattern     Use the synthetic source instead of a webcam
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info};

use signspeak_client::capture::SourceKind;
use signspeak_client::commands::{self, AppState};
use signspeak_client::config::ClientConfig;
use signspeak_client::ui;

// ── CLI ──────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "signspeak", about = "Sign language translation client")]
struct Cli {
    /// Path to configuration TOML file.
    #[arg(short, long, default_value = "signspeak.toml")]
    config: PathBuf,

    /// Frame source (overrides config): webcam or pattern.
    #[arg(short, long)]
    source: Option<SourceKind>,

    /// Write the default configuration to the config path and exit.
    #[arg(long)]
    gen_config: bool,
}

const HELP: &str = "commands: camera | replay | listen | type <text> | sign [text] | status | quit";

// ── Main ─────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.gen_config {
        ClientConfig::write_default(&cli.config)
            .with_context(|| format!("writing {}", cli.config.display()))?;
        println!("wrote {}", cli.config.display());
        return Ok(());
    }

    let mut config = ClientConfig::load(&cli.config);
    if let Some(source) = cli.source {
        config.capture.source = source;
    }

    signspeak_client::init_tracing(&config.logging.level);
    info!("signspeak v{}", env!("CARGO_PKG_VERSION"));

    let state = Arc::new(AppState::from_config(config).context("building client")?);

    let render = spawn_renderer(&state).await;
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, Some(rest.trim())),
            None => (line, None),
        };

        match command {
            "camera" => {
                if let Err(e) = commands::camera::toggle_camera(&state).await {
                    debug!("camera: [{}] {}", e.code(), e);
                }
            }
            "replay" => {
                commands::camera::replay_audio(&state);
            }
            "listen" => match commands::voice::listen(&state).await {
                Ok(Some(heard)) => println!("> {heard}"),
                Ok(None) => println!("(nothing heard)"),
                Err(e) => debug!("listen: [{}] {}", e.code(), e),
            },
            "type" => {
                state.text.set(rest.unwrap_or_default());
            }
            "sign" => {
                // Playback runs in the background so capture commands stay live
                let state = state.clone();
                let text = rest.map(str::to_string);
                tokio::spawn(async move {
                    if let Err(e) = commands::avatar::sign(&state, text.as_deref()).await {
                        debug!("sign: [{}] {}", e.code(), e);
                    }
                });
            }
            "status" => print_status(&state).await,
            "quit" | "exit" => break,
            _ => println!("{HELP}"),
        }
    }

    state.capture.lock().await.stop();
    render.abort();
    info!("bye");
    Ok(())
}

async fn print_status(state: &AppState) {
    let capture = state.capture.lock().await;
    let stats = capture.stats();
    println!(
        "camera: {:?} | ticks {} sent {} skipped {} failed {}",
        capture.state(),
        stats.ticks,
        stats.sent,
        stats.skipped,
        stats.failures
    );
    if let Some(session) = capture.session() {
        println!("session: {} ({} ms)", session.id, session.duration_ms());
    }
    let cameras = signspeak_client::capture::get_cameras();
    println!(
        "source: {:?} ({} camera(s) detected)",
        state.config.capture.source,
        cameras.len()
    );
    println!("avatar: {:?}", state.avatar.state());
    println!(
        "voice: {}",
        if state.voice.is_some() { "available" } else { "unavailable" }
    );
    println!("text: {:?}", state.text.get());
}

/// Print events from every component until aborted
async fn spawn_renderer(state: &AppState) -> tokio::task::JoinHandle<()> {
    let mut recognition = state.capture.lock().await.subscribe();
    let mut avatar = state.avatar.subscribe();
    let mut app = state.subscribe();

    tokio::spawn(async move {
        loop {
            let line = tokio::select! {
                event = recognition.recv() => match event {
                    Ok(event) => ui::render_recognition(&event),
                    Err(RecvError::Lagged(n)) => lagged(n),
                    Err(RecvError::Closed) => break,
                },
                event = avatar.recv() => match event {
                    Ok(event) => Some(ui::render_avatar(&event)),
                    Err(RecvError::Lagged(n)) => lagged(n),
                    Err(RecvError::Closed) => break,
                },
                event = app.recv() => match event {
                    Ok(event) => Some(ui::render_app(&event)),
                    Err(RecvError::Lagged(n)) => lagged(n),
                    Err(RecvError::Closed) => break,
                },
            };
            if let Some(line) = line {
                println!("{line}");
            }
        }
    })
}

fn lagged(skipped: u64) -> Option<String> {
    debug!("renderer lagged by {} events", skipped);
    None
}
