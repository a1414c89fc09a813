//! Configuration module for Lekse.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, SummaryPrompts};
pub use settings::{
    Credentials, ExtractionSettings, GeneralSettings, PromptSettings, Settings,
    SummarizationSettings, SynthesisSettings, YoutubeSettings,
};
