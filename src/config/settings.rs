//! Configuration settings for Lekse.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub extraction: ExtractionSettings,
    pub youtube: YoutubeSettings,
    pub summarization: SummarizationSettings,
    pub synthesis: SynthesisSettings,
    pub prompts: PromptSettings,
}


/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for storing application data.
    pub data_dir: String,
    /// Directory where generated audio artifacts are written.
    pub output_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: "~/.lekse".to_string(),
            output_dir: "~/.lekse/outputs".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Settings for fetching source content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    /// Timeout for article fetches, in seconds.
    pub http_timeout_seconds: u64,
    /// User-Agent header sent with article fetches. Some sites refuse
    /// requests without a browser-looking agent.
    pub user_agent: String,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            http_timeout_seconds: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
                .to_string(),
        }
    }
}

/// YouTube-specific settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct YoutubeSettings {
    /// YouTube Data API key. Falls back to the YOUTUBE_API_KEY
    /// environment variable when not set here.
    pub api_key: Option<String>,
}


/// Summarization service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizationSettings {
    /// Default model identifier when the caller does not supply one.
    pub model: String,
    /// Maximum number of content characters inserted into the prompt.
    pub max_content_chars: usize,
    /// Timeout for summarization requests, in seconds.
    pub request_timeout_seconds: u64,
}

impl Default for SummarizationSettings {
    fn default() -> Self {
        Self {
            model: "meta-llama/llama-3-8b-instruct".to_string(),
            max_content_chars: 6000,
            request_timeout_seconds: 300,
        }
    }
}

/// Speech synthesis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisSettings {
    /// Whether to generate an audio rendition of the summary.
    pub enabled: bool,
    /// Speech engine command. Must accept `-f <textfile> -w <wavfile>`
    /// (espeak/espeak-ng convention).
    pub engine: String,
    /// Voice passed to the engine with `-v` (engine default when unset).
    pub voice: Option<String>,
    /// Timeout for the engine invocation, in seconds.
    pub timeout_seconds: u64,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            engine: "espeak-ng".to_string(),
            voice: None,
            timeout_seconds: 60,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}


impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::LekseError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lekse")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded data directory path.
    pub fn data_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.data_dir)
    }

    /// Get the expanded artifact output directory path.
    pub fn output_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.output_dir)
    }
}

/// API credentials, resolved once and injected into the clients that need
/// them. Nothing else in the pipeline reads the environment.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// OpenRouter API key for summarization requests.
    pub openrouter_api_key: Option<String>,
    /// YouTube Data API key for video metadata.
    pub youtube_api_key: Option<String>,
}

impl Credentials {
    /// Resolve credentials from the environment, letting the config file
    /// supply the YouTube key when the environment does not.
    pub fn resolve(settings: &Settings) -> Self {
        let non_empty = |v: std::result::Result<String, std::env::VarError>| {
            v.ok().filter(|s| !s.is_empty())
        };

        Self {
            openrouter_api_key: non_empty(std::env::var("OPENROUTER_API_KEY")),
            youtube_api_key: non_empty(std::env::var("YOUTUBE_API_KEY"))
                .or_else(|| settings.youtube.api_key.clone().filter(|s| !s.is_empty())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.extraction.http_timeout_seconds, 10);
        assert_eq!(settings.summarization.max_content_chars, 6000);
        assert_eq!(settings.synthesis.timeout_seconds, 60);
        assert!(settings.synthesis.enabled);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let settings: Settings =
            toml::from_str("[synthesis]\nengine = \"espeak\"\n").unwrap();
        assert_eq!(settings.synthesis.engine, "espeak");
        assert_eq!(settings.synthesis.timeout_seconds, 60);
        assert_eq!(settings.summarization.model, "meta-llama/llama-3-8b-instruct");
    }

    #[test]
    fn test_expand_path() {
        let expanded = Settings::expand_path("~/.lekse");
        assert!(!expanded.to_string_lossy().starts_with('~'));
    }
}
