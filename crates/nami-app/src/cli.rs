//! CLI argument definitions for the NamiBot binary.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use nami_core::NamiConfig;

/// NamiBot, a Wikipedia research assistant for the terminal.
#[derive(Parser, Debug)]
#[command(name = "namibot", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Wikipedia language edition, e.g. "en" or "de".
    #[arg(long = "language", global = true)]
    pub language: Option<String>,

    /// Do not contact Wikipedia; every lookup reports the source as unavailable.
    #[arg(long = "offline", global = true)]
    pub offline: bool,

    /// Seed for reply selection, for reproducible conversations.
    #[arg(long = "seed", global = true)]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive console conversation (default).
    Chat,
    /// Run the scripted demonstration conversation.
    Demo {
        /// Pause between scripted lookups, in milliseconds.
        #[arg(long = "delay-ms", default_value_t = 1000)]
        delay_ms: u64,
    },
    /// Answer a single utterance and exit.
    Ask {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Write the default configuration file to the resolved config path.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(long = "force")]
        force: bool,
    },
}

impl CliArgs {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Chat)
    }

    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > NAMIBOT_CONFIG env var > ~/.namibot/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("NAMIBOT_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the tracing filter directive.
    ///
    /// Priority: --log-level flag > config file value > "warn".
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        if let Some(ref level) = self.log_level {
            return level.clone();
        }
        if !config_level.trim().is_empty() {
            return config_level.to_string();
        }
        "warn".to_string()
    }

    /// Fold flag overrides into the loaded configuration.
    pub fn apply_overrides(&self, config: &mut NamiConfig) {
        if let Some(ref language) = self.language {
            config.source.language = language.clone();
        }
        if self.offline {
            config.source.enabled = false;
        }
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".namibot").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".namibot").join("config.toml");
    }
    PathBuf::from("config.toml")
}
