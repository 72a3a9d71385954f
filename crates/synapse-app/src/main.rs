//! Synapse application binary - composition root.
//!
//! 1. Parse CLI arguments and initialize tracing
//! 2. Load configuration from TOML and apply its log level
//! 3. Either host a presentation in this terminal or serve the HTTP API

mod cli;
mod console;
mod cues;

use clap::Parser;
use synapse_api::routes;
use synapse_api::state::AppState;
use synapse_core::config::SynapseConfig;
use synapse_script::{build_judge, build_program, Presentation, ScriptKind, SessionMode};
use tokio::io::BufReader;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

use crate::cli::{CliArgs, Command};
use crate::console::Console;

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// `RUST_LOG` wins, then `--log-level`, then info until the config is read.
fn init_tracing(level: Option<&str>) -> FilterHandle {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.unwrap_or("info")))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter, handle) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
    handle
}

/// Switch to the configured level unless one was given explicitly.
fn apply_config_level(args: &CliArgs, handle: &FilterHandle, level: &str) {
    if args.log_level.is_some() || std::env::var_os("RUST_LOG").is_some() {
        return;
    }
    match EnvFilter::try_new(level) {
        Ok(filter) => {
            if let Err(e) = handle.reload(filter) {
                tracing::warn!(error = %e, "Failed to apply configured log level");
            }
        }
        Err(e) => tracing::warn!(level, error = %e, "Invalid log level in config"),
    }
}

async fn host(
    config: &SynapseConfig,
    script: ScriptKind,
    mode: Option<SessionMode>,
) -> Result<(), Box<dyn std::error::Error>> {
    let threshold = config.game.similarity_threshold;
    let judge = build_judge(&config.judge, threshold);
    let mut console = Console::new(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        judge,
        config.voice.sound_cues,
    );

    let mode = match (script, mode) {
        (ScriptKind::Session, None) => match console.choose_mode().await? {
            Some(mode) => mode,
            None => return Ok(()),
        },
        (_, mode) => mode.unwrap_or_default(),
    };

    tracing::info!(%script, %mode, "Hosting presentation");
    let mut presentation = Presentation::new(build_program(script, mode, &config.game), threshold);
    if console.run(&mut presentation).await? {
        tracing::info!(outcome = ?presentation.outcome(), "Presentation complete");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let filter = init_tracing(args.log_level.as_deref());

    tracing::info!("Starting Synapse v{}", env!("CARGO_PKG_VERSION"));

    let config_file = args.resolve_config_path();
    let mut config = SynapseConfig::load_or_default(&config_file);
    apply_config_level(&args, &filter, &config.general.log_level);
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    match args.command() {
        Command::Host { script, mode } => host(&config, script, mode).await?,
        Command::Serve { .. } => {
            config.server.port = args.resolve_port(config.server.port);
            let state = AppState::new(config.clone());
            routes::start_server(&config, state).await?;
        }
    }

    Ok(())
}
