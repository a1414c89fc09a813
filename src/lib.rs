//! Lekse - Spoken Study Summaries
//!
//! A CLI tool that turns articles and videos into educational summaries
//! with spoken-audio renditions.
//!
//! The name "Lekse" comes from the Norwegian word for "lesson."
//!
//! # Overview
//!
//! Lekse allows you to:
//! - Pull raw content from web articles and YouTube videos
//! - Generate an in-depth educational summary with an LLM
//! - Extract five actionable key learning points from the response
//! - Render the summary as a WAV audio artifact with a local speech engine
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration, credentials, and prompt templates
//! - `source` - Content extraction (article, YouTube, generic stub)
//! - `summarize` - Summarization requests against OpenRouter
//! - `parse` - Heuristic parsing of the raw model response
//! - `synthesis` - Speech synthesis via a local engine
//! - `pipeline` - Isolated per-job orchestration
//!
//! # Example
//!
//! ```rust,no_run
//! use lekse::config::{Credentials, Settings};
//! use lekse::pipeline::{Job, Pipeline};
//! use lekse::source::SourceType;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let credentials = Credentials::resolve(&settings);
//!     let pipeline = Pipeline::new(settings, credentials)?;
//!
//!     let result = pipeline
//!         .process(Job {
//!             source_id: 1,
//!             url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
//!             source_type: SourceType::Youtube,
//!             model: "meta-llama/llama-3-8b-instruct".to_string(),
//!         })
//!         .await?;
//!     println!("{} key points", result.key_points.len());
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod openrouter;
pub mod parse;
pub mod pipeline;
pub mod source;
pub mod summarize;
pub mod synthesis;

pub use error::{LekseError, Result};
