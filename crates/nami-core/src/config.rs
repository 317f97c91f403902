use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{NamiError, Result};

/// Top-level configuration for NamiBot.
///
/// Loaded from `~/.namibot/config.toml` by default. Every section falls back
/// to its defaults when omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NamiConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

impl NamiConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: NamiConfig = toml::from_str(&content)?;
        config.validate()?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Reject values the engine or the document source cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.bot.name.trim().is_empty() {
            return Err(NamiError::Config("bot.name must not be empty".into()));
        }
        if self.bot.summary_max_chars == 0 {
            return Err(NamiError::Config(
                "bot.summary_max_chars must be greater than 0".into(),
            ));
        }
        if self.source.language.trim().is_empty() {
            return Err(NamiError::Config("source.language must not be empty".into()));
        }
        if self.source.timeout_secs == 0 {
            return Err(NamiError::Config(
                "source.timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Conversational persona settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Name the bot introduces itself with.
    pub name: String,
    /// Display name used until the user introduces themselves.
    pub default_user_name: String,
    /// Summary length cap, in characters, before an ellipsis is appended.
    pub summary_max_chars: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "NamiBot".to_string(),
            default_user_name: "User".to_string(),
            summary_max_chars: 600,
        }
    }
}

/// Encyclopedic document source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Whether lookups go to the network at all.
    pub enabled: bool,
    /// Wikipedia language edition, e.g. "en" or "de".
    pub language: String,
    /// MediaWiki action API endpoint. Empty means derive it from `language`.
    pub api_url: String,
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// Connect/read/write timeout for a single HTTP request.
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            language: "en".to_string(),
            api_url: String::new(),
            user_agent: "NamiBot/1.0 (https://github.com/namibot/namibot)".to_string(),
            timeout_secs: 10,
        }
    }
}

impl SourceConfig {
    /// The effective API endpoint.
    pub fn endpoint(&self) -> String {
        if self.api_url.trim().is_empty() {
            format!("https://{}.wikipedia.org/w/api.php", self.language.trim())
        } else {
            self.api_url.trim().to_string()
        }
    }
}
