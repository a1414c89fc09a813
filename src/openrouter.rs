//! OpenRouter client configuration.
//!
//! OpenRouter exposes an OpenAI-compatible chat completions API, so the
//! standard client works against it with a swapped API base.

use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// OpenRouter's OpenAI-compatible API base.
pub const API_BASE: &str = "https://openrouter.ai/api/v1";

/// Create an OpenRouter client with a configured request timeout.
pub fn create_client(api_key: &str, timeout: Duration) -> Client<OpenAIConfig> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to create HTTP client");

    let config = OpenAIConfig::new()
        .with_api_base(API_BASE)
        .with_api_key(api_key);

    Client::with_config(config).with_http_client(http_client)
}
