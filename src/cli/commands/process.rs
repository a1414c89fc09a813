//! Process command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::{content_preview, Output};
use crate::config::{Credentials, Settings};
use crate::pipeline::{Job, Pipeline};
use crate::source::SourceType;
use anyhow::Result;

/// Run the process command.
pub async fn run_process(
    url: &str,
    source_type: SourceType,
    model: Option<String>,
    source_id: i64,
    no_audio: bool,
    json: bool,
    mut settings: Settings,
) -> Result<()> {
    let credentials = Credentials::resolve(&settings);

    if let Err(e) = preflight::check(Operation::Process, &credentials) {
        Output::error(&format!("{}", e));
        Output::info("Run 'lekse doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    if no_audio {
        settings.synthesis.enabled = false;
    }

    let model = model.unwrap_or_else(|| settings.summarization.model.clone());
    let pipeline = Pipeline::new(settings, credentials)?;

    let job = Job {
        source_id,
        url: url.to_string(),
        source_type,
        model,
    };

    let spinner = Output::spinner(&format!("Processing {} source...", source_type));
    let result = pipeline.process(job).await;
    spinner.finish_and_clear();

    let result = match result {
        Ok(r) => r,
        Err(e) => {
            Output::error(&format!("{}", e));
            return Err(e.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    Output::success(&format!("Processed: {}", result.title));

    Output::header("Summary");
    println!("{}", result.summary);

    Output::header("Key Learning Points");
    for point in &result.key_points {
        Output::list_item(point);
    }

    match &result.audio_path {
        Some(path) => {
            Output::header("Audio");
            Output::kv("artifact", &path.display().to_string());
        }
        None => {
            Output::warning("No audio artifact was generated.");
        }
    }

    Output::kv("content", &content_preview(&result.content, 120));

    Ok(())
}
