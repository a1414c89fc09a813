//! Error types for Lekse.

use thiserror::Error;

/// Library-level error type for Lekse operations.
#[derive(Error, Debug)]
pub enum LekseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing credential: {0}. Set the {0} environment variable.")]
    MissingCredential(String),

    #[error("Content extraction failed: {0}")]
    Extraction(String),

    #[error("Transcript unavailable: {0}")]
    Transcript(String),

    #[error("Summarization failed: {0}")]
    Summarization(String),

    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),

    #[error("Job failed: {0}")]
    Job(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("External tool failed: {0}")]
    ToolFailed(String),
}

/// Result type alias for Lekse operations.
pub type Result<T> = std::result::Result<T, LekseError>;
