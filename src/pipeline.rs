//! Pipeline orchestrator for Lekse.
//!
//! Sequences extraction, summarization, parsing, and synthesis for one job,
//! running the whole sequence in its own task so a hung fetch or speech
//! engine cannot block the caller. The caller submits a job and awaits a
//! single typed result-or-error; the task is torn down unconditionally
//! after completion.

use crate::config::{Credentials, Prompts, Settings};
use crate::error::{LekseError, Result};
use crate::parse;
use crate::source::{extractor_for, ContentExtractor, SourceType};
use crate::summarize::SummaryClient;
use crate::synthesis::SpeechSynthesizer;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// One processing request, immutable for its lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Caller-side identifier, echoed back in the result and used to name
    /// the audio artifact.
    pub source_id: i64,
    /// Source URL.
    pub url: String,
    /// Declared source type.
    pub source_type: SourceType,
    /// Model identifier forwarded to the summarization service.
    pub model: String,
}

/// The complete result of a processed job.
///
/// This is the sole value returned to the caller; on failure a single
/// typed error replaces it. A missing audio path is a legitimate success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResult {
    pub source_id: i64,
    /// Extracted raw content.
    pub content: String,
    /// Extracted title.
    pub title: String,
    /// The narrative portion of the generated summary.
    pub summary: String,
    /// Ordered key learning points.
    pub key_points: Vec<String>,
    /// Path to the generated audio artifact, when synthesis succeeded.
    pub audio_path: Option<PathBuf>,
}

/// The main orchestrator for the Lekse pipeline.
pub struct Pipeline {
    settings: Settings,
    credentials: Credentials,
    summarizer: Arc<SummaryClient>,
    synthesizer: SpeechSynthesizer,
}

impl Pipeline {
    /// Create a pipeline with explicit credentials.
    pub fn new(settings: Settings, credentials: Credentials) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let summarizer = Arc::new(SummaryClient::new(
            credentials.openrouter_api_key.as_deref(),
            &settings.summarization,
            prompts,
        ));

        let synthesizer = SpeechSynthesizer::new(&settings.synthesis);

        std::fs::create_dir_all(settings.output_dir())?;

        Ok(Self {
            settings,
            credentials,
            summarizer,
            synthesizer,
        })
    }

    /// Get the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Process one job in an isolated task and await its result.
    ///
    /// Extraction failures degrade to stub content inside the extractor;
    /// summarization failures fail the job; synthesis failures degrade to
    /// a result without audio. A panic inside the worker surfaces as a
    /// single job error rather than an unstructured fault.
    #[instrument(skip(self), fields(source_id = job.source_id, source_type = %job.source_type))]
    pub async fn process(&self, job: Job) -> Result<JobResult> {
        let extractor = extractor_for(job.source_type, &self.settings, &self.credentials);
        let summarizer = Arc::clone(&self.summarizer);
        let synthesizer = self.synthesizer.clone();
        let synthesis_enabled = self.settings.synthesis.enabled;
        let output_dir = self.settings.output_dir();

        let worker = tokio::spawn(run_job(
            job,
            extractor,
            summarizer,
            synthesizer,
            synthesis_enabled,
            output_dir,
        ));

        match worker.await {
            Ok(result) => result,
            Err(e) => Err(LekseError::Job(format!(
                "Worker terminated abnormally: {}",
                e
            ))),
        }
    }
}

/// The job body: extract, summarize, parse, synthesize, assemble.
async fn run_job(
    job: Job,
    extractor: Box<dyn ContentExtractor>,
    summarizer: Arc<SummaryClient>,
    synthesizer: SpeechSynthesizer,
    synthesis_enabled: bool,
    output_dir: PathBuf,
) -> Result<JobResult> {
    info!("Extracting {} content from {}", job.source_type, job.url);
    let content = extractor.extract(&job).await;
    info!("Extracted '{}' ({} chars)", content.title, content.body.chars().count());

    info!("Requesting summary from {}", job.model);
    let raw = summarizer.summarize(&content.body, &job.model).await?;

    let summary = parse::parse(&raw);
    info!("Parsed {} key points", summary.key_points.len());

    let audio_path = if synthesis_enabled {
        match synthesizer.synthesize(&summary.tts_excerpt()).await {
            Some(bytes) => save_artifact(&output_dir, job.source_id, &bytes),
            None => None,
        }
    } else {
        None
    };

    Ok(JobResult {
        source_id: job.source_id,
        content: content.body,
        title: content.title,
        summary: summary.narrative,
        key_points: summary.key_points,
        audio_path,
    })
}

/// Persist audio bytes to the outputs directory.
///
/// A write failure degrades to a result without audio; it never fails the
/// job.
fn save_artifact(output_dir: &Path, source_id: i64, bytes: &[u8]) -> Option<PathBuf> {
    let path = output_dir.join(format!(
        "podcast_{}_{}.wav",
        source_id,
        Utc::now().timestamp_millis()
    ));

    match std::fs::write(&path, bytes) {
        Ok(()) => {
            info!("Wrote audio artifact to {}", path.display());
            Some(path)
        }
        Err(e) => {
            warn!("Failed to write audio artifact: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_pipeline(output_dir: &Path) -> Pipeline {
        let mut settings = Settings::default();
        settings.general.output_dir = output_dir.to_string_lossy().to_string();
        // No credentials injected
        Pipeline::new(settings, Credentials::default()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_credential_fails_job_without_side_effects() {
        let scratch = tempfile::tempdir().unwrap();
        let pipeline = test_pipeline(scratch.path());

        // Generic source: extraction needs no network, so the first
        // fallible step is the summarization credential check.
        let job = Job {
            source_id: 42,
            url: "https://example.com/thread".to_string(),
            source_type: SourceType::Forum,
            model: "meta-llama/llama-3-8b-instruct".to_string(),
        };

        let err = pipeline.process(job).await.unwrap_err();
        assert!(err.to_string().contains("OPENROUTER_API_KEY"));

        // No artifact was attempted
        let entries: Vec<_> = std::fs::read_dir(scratch.path()).unwrap().collect();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_save_artifact_names_by_source_id() {
        let scratch = tempfile::tempdir().unwrap();
        let path = save_artifact(scratch.path(), 7, b"RIFFdata").unwrap();

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("podcast_7_"));
        assert!(name.ends_with(".wav"));
        assert_eq!(std::fs::read(&path).unwrap(), b"RIFFdata");
    }

    #[test]
    fn test_save_artifact_write_failure_degrades() {
        let missing = Path::new("/nonexistent/lekse/outputs");
        assert!(save_artifact(missing, 1, b"RIFFdata").is_none());
    }
}
