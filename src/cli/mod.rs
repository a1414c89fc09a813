//! CLI module for Lekse.

pub mod commands;
mod output;
pub mod preflight;

pub use output::{content_preview, Output};

use crate::source::SourceType;
use clap::{Parser, Subcommand};

/// Lekse - spoken study summaries from articles and videos
///
/// Fetches content from a URL, generates an educational summary with five
/// key learning points, and optionally renders the summary as audio.
/// The name "Lekse" comes from the Norwegian word for "lesson."
#[derive(Parser, Debug)]
#[command(name = "lekse")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Lekse and verify system requirements
    Init,

    /// Check system requirements and configuration
    Doctor,

    /// Process a content source into a summary and audio artifact
    Process {
        /// Source URL
        url: String,

        /// Source type (article, youtube, podcast, social, forum)
        #[arg(short = 't', long = "type", default_value = "article")]
        source_type: SourceType,

        /// Model identifier, e.g. meta-llama/llama-3-8b-instruct,
        /// openai/gpt-3.5-turbo, anthropic/claude-3-haiku
        #[arg(short, long)]
        model: Option<String>,

        /// Caller-side source ID echoed into the result and artifact name
        #[arg(long, default_value = "0")]
        source_id: i64,

        /// Skip audio synthesis
        #[arg(long)]
        no_audio: bool,

        /// Print the result envelope as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
