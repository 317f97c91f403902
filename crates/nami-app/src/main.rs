//! NamiBot binary - composition root.
//!
//! 1. Parse CLI flags and load configuration from TOML
//! 2. Install the tracing subscriber
//! 3. Build the Wikipedia source (or the offline stand-in)
//! 4. Build the response engine and hand it to the chosen adapter

mod cli;
mod console;
mod demo;

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use clap::Parser;

use nami_chat::{EngineConfig, RandomPicker, ResponseEngine};
use nami_core::{DocumentSource, NamiConfig, UnavailableSource};
use nami_wiki::WikiSource;

use cli::{CliArgs, Command};
use console::ChatExit;

pub type AppResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Pick the document source for this run.
///
/// Falls back to `UnavailableSource` when lookups are disabled or the client
/// cannot be built, so the conversation still works offline.
fn build_source(config: &NamiConfig) -> Box<dyn DocumentSource> {
    if !config.source.enabled {
        tracing::info!("Document source disabled, running offline");
        return Box::new(UnavailableSource);
    }
    match WikiSource::new(&config.source) {
        Ok(source) => {
            tracing::info!(endpoint = %source.endpoint(), "Wikipedia source initialized");
            Box::new(source)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Wikipedia source unavailable");
            Box::new(UnavailableSource)
        }
    }
}

fn build_engine(config: &NamiConfig, seed: Option<u64>) -> nami_core::Result<ResponseEngine> {
    let picker = match seed {
        Some(seed) => RandomPicker::seeded(seed),
        None => RandomPicker::new(),
    };
    let engine = ResponseEngine::new(
        EngineConfig::from(&config.bot),
        build_source(config),
        Box::new(picker),
    )?;
    Ok(engine)
}

/// Write the default configuration to `path`.
///
/// An existing file is kept unless `force` is set.
fn init_config(path: &Path, force: bool) -> AppResult {
    if path.exists() && !force {
        println!(
            "Configuration already exists at {} (use --force to overwrite)",
            path.display()
        );
        return Ok(());
    }
    NamiConfig::default().save(path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> AppResult {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let mut config = NamiConfig::load_or_default(&config_file);
    args.apply_overrides(&mut config);
    config.validate()?;

    // Tracing.
    let level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting NamiBot v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!(path = %config_file.display(), "Configuration resolved");

    if let Command::InitConfig { force } = args.command() {
        return init_config(&config_file, force);
    }

    let engine = build_engine(&config, args.seed)?;

    match args.command() {
        Command::Chat => {
            if console::run_chat(engine).await? == ChatExit::Interrupted {
                // A reply may still be running on the blocking pool; do not wait for it.
                std::io::stdout().flush()?;
                std::process::exit(0);
            }
        }
        Command::Demo { delay_ms } => {
            demo::run_demo(engine, Duration::from_millis(delay_ms)).await?
        }
        Command::Ask { text } => {
            let bot_name = engine.bot_name().to_string();
            let (_, reply) = console::respond_blocking(engine, text.join(" ")).await?;
            println!("{}: {}", bot_name, reply);
        }
        Command::InitConfig { .. } => {}
    }

    Ok(())
}
