//! Speech synthesis via a local speech engine.
//!
//! The exchange with the engine goes through a scoped temporary directory:
//! the text is written to a file, the engine renders it to a WAV file, and
//! the bytes are read back. The directory is cleaned up on every exit path
//! (success, timeout, or invocation error) by the tempdir guard.

use crate::config::SynthesisSettings;
use crate::error::{LekseError, Result};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Local speech engine wrapper.
///
/// The configured command must accept `-f <textfile> -w <wavfile>` and
/// optionally `-v <voice>`, the espeak/espeak-ng convention.
#[derive(Debug, Clone)]
pub struct SpeechSynthesizer {
    engine: String,
    voice: Option<String>,
    timeout: Duration,
}

impl SpeechSynthesizer {
    pub fn new(settings: &SynthesisSettings) -> Self {
        Self {
            engine: settings.engine.clone(),
            voice: settings.voice.clone(),
            timeout: Duration::from_secs(settings.timeout_seconds),
        }
    }

    /// Render `text` to WAV bytes.
    ///
    /// Never propagates failure: an unavailable engine, a timeout, or a
    /// missing voice logs a warning and returns `None`, which the caller
    /// treats as a legitimate no-audio outcome.
    pub async fn synthesize(&self, text: &str) -> Option<Vec<u8>> {
        if text.trim().is_empty() {
            debug!("Nothing to synthesize, skipping audio generation");
            return None;
        }

        match self.render(text).await {
            Ok(bytes) => {
                info!("Synthesized {} bytes of audio", bytes.len());
                Some(bytes)
            }
            Err(e) => {
                warn!("Speech synthesis failed, continuing without audio: {}", e);
                None
            }
        }
    }

    async fn render(&self, text: &str) -> Result<Vec<u8>> {
        // Dropping the tempdir removes both files on every exit path
        let scratch = tempfile::tempdir()?;
        let text_path = scratch.path().join("speech.txt");
        let wav_path = scratch.path().join("speech.wav");

        tokio::fs::write(&text_path, text).await?;

        let mut command = Command::new(&self.engine);
        command
            .arg("-f")
            .arg(&text_path)
            .arg("-w")
            .arg(&wav_path)
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        if let Some(voice) = &self.voice {
            command.arg("-v").arg(voice);
        }

        debug!("Invoking speech engine {}", self.engine);

        let result = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| {
                LekseError::Synthesis(format!(
                    "{} timed out after {}s",
                    self.engine,
                    self.timeout.as_secs()
                ))
            })?;

        let output = match result {
            Ok(o) => o,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(LekseError::ToolNotFound(self.engine.clone()));
            }
            Err(e) => {
                return Err(LekseError::Synthesis(format!(
                    "{} execution failed: {}",
                    self.engine, e
                )));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LekseError::ToolFailed(format!(
                "{} exited with {}: {}",
                self.engine,
                output.status,
                stderr.trim()
            )));
        }

        let bytes = tokio::fs::read(&wav_path).await?;
        if bytes.is_empty() {
            return Err(LekseError::Synthesis(format!(
                "{} produced an empty audio file",
                self.engine
            )));
        }

        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthesizer_with_engine(engine: &str) -> SpeechSynthesizer {
        SpeechSynthesizer::new(&SynthesisSettings {
            enabled: true,
            engine: engine.to_string(),
            voice: None,
            timeout_seconds: 5,
        })
    }

    #[tokio::test]
    async fn test_missing_engine_returns_none() {
        let synth = synthesizer_with_engine("lekse-no-such-speech-engine");
        assert!(synth.synthesize("hello there, this is a test").await.is_none());
    }

    #[tokio::test]
    async fn test_empty_text_returns_none() {
        let synth = synthesizer_with_engine("lekse-no-such-speech-engine");
        assert!(synth.synthesize("   ").await.is_none());
    }

    #[tokio::test]
    async fn test_failing_engine_returns_none() {
        // `false` exits non-zero without reading its arguments
        let synth = synthesizer_with_engine("false");
        assert!(synth.synthesize("hello there, this is a test").await.is_none());
    }
}
