//! Summarization client.
//!
//! Issues a single structured-prompt request to OpenRouter and returns the
//! raw model output. Failures here are fatal to the job and are never
//! retried; a job without a summary has no value.

use crate::config::{Prompts, SummarizationSettings};
use crate::error::{LekseError, Result};
use crate::openrouter;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

/// Model identifiers known to work well here. The list is advisory: the
/// identifier is forwarded as-is and an unknown one simply surfaces as an
/// API error.
pub const KNOWN_MODELS: &[&str] = &[
    "meta-llama/llama-3-8b-instruct",
    "microsoft/wizardlm-2-8x22b",
    "google/gemini-flash-1.0",
    "mistralai/mistral-7b-instruct",
    "openai/gpt-3.5-turbo",
    "openai/gpt-4",
    "anthropic/claude-3-haiku",
];

/// Client for educational-summary generation.
pub struct SummaryClient {
    client: Option<Client<OpenAIConfig>>,
    prompts: Prompts,
    max_content_chars: usize,
}

impl SummaryClient {
    /// Create a client with an injected credential. `api_key` of `None`
    /// builds a client that fails with a missing-credential error on use,
    /// so the failure surfaces per job rather than at startup.
    pub fn new(
        api_key: Option<&str>,
        settings: &SummarizationSettings,
        prompts: Prompts,
    ) -> Self {
        let client = api_key.filter(|k| !k.is_empty()).map(|key| {
            openrouter::create_client(
                key,
                Duration::from_secs(settings.request_timeout_seconds),
            )
        });

        Self {
            client,
            prompts,
            max_content_chars: settings.max_content_chars,
        }
    }

    /// Request an educational summary of `content` from the given model.
    /// Returns the raw model output for downstream parsing.
    #[instrument(skip(self, content), fields(model = %model))]
    pub async fn summarize(&self, content: &str, model: &str) -> Result<String> {
        let client = self.client.as_ref().ok_or_else(|| {
            LekseError::MissingCredential("OPENROUTER_API_KEY".to_string())
        })?;

        let prompt = self.build_prompt(content);
        debug!("Summarization prompt is {} chars", prompt.chars().count());

        let messages: Vec<ChatCompletionRequestMessage> =
            vec![ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| LekseError::Summarization(e.to_string()))?
                .into()];

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .build()
            .map_err(|e| LekseError::Summarization(e.to_string()))?;

        let response = client.chat().create(request).await.map_err(|e| {
            LekseError::Summarization(format!("OpenRouter request failed: {}", e))
        })?;

        let raw = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| {
                LekseError::Summarization("Empty response from model".to_string())
            })?
            .clone();

        Ok(raw)
    }

    /// Render the summary prompt, truncating the content to a fixed prefix
    /// so request size is bounded regardless of source length.
    fn build_prompt(&self, content: &str) -> String {
        let truncated: String = content.chars().take(self.max_content_chars).collect();

        let mut vars = HashMap::new();
        vars.insert("content".to_string(), truncated);

        self.prompts
            .render_with_custom(&self.prompts.summary.user, &vars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SummarizationSettings;

    fn client(api_key: Option<&str>) -> SummaryClient {
        SummaryClient::new(api_key, &SummarizationSettings::default(), Prompts::default())
    }

    #[tokio::test]
    async fn test_missing_credential_is_fatal() {
        let c = client(None);
        let err = c
            .summarize("some content", "meta-llama/llama-3-8b-instruct")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("OPENROUTER_API_KEY"));
    }

    #[tokio::test]
    async fn test_empty_credential_is_fatal() {
        let c = client(Some(""));
        assert!(c
            .summarize("some content", "meta-llama/llama-3-8b-instruct")
            .await
            .is_err());
    }

    #[test]
    fn test_prompt_contains_content_and_points_section() {
        let c = client(Some("test-key"));
        let prompt = c.build_prompt("the article body");

        assert!(prompt.contains("the article body"));
        assert!(prompt.contains("**Key Learning Points:**"));
    }

    #[test]
    fn test_prompt_truncates_long_content() {
        let c = client(Some("test-key"));
        let long_content = "a".repeat(10_000);
        let prompt = c.build_prompt(&long_content);

        // 6000-char prefix inserted, the rest dropped
        assert!(prompt.contains(&"a".repeat(6000)));
        assert!(!prompt.contains(&"a".repeat(6001)));
    }
}
