//! Article source implementation.

use super::{ContentExtractor, ExtractedContent, SourceType};
use crate::config::ExtractionSettings;
use crate::error::{LekseError, Result};
use crate::pipeline::Job;
use async_trait::async_trait;
use regex::Regex;
use std::time::Duration;
use tracing::{debug, warn};

/// Web article extractor.
///
/// Fetches the page and hands the raw HTML downstream; stripping markup is
/// out of scope since the summarization prompt truncates the body anyway.
pub struct ArticleExtractor {
    client: reqwest::Client,
    title_regex: Regex,
}

impl ArticleExtractor {
    pub fn new(settings: &ExtractionSettings) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(Duration::from_secs(settings.http_timeout_seconds))
            .build()
            .unwrap_or_default();

        // case-insensitive, and (?s) so multi-line titles still match
        let title_regex =
            Regex::new(r"(?is)<title>(.*?)</title>").expect("Invalid regex");

        Self { client, title_regex }
    }

    async fn try_extract(&self, url: &str) -> Result<ExtractedContent> {
        debug!("Fetching article {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LekseError::Extraction(format!(
                "Article fetch returned {} for {}",
                status, url
            )));
        }

        let body = response.text().await?;

        let title = self
            .title_regex
            .captures(&body)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Article".to_string());

        Ok(ExtractedContent { title, body })
    }
}

#[async_trait]
impl ContentExtractor for ArticleExtractor {
    fn source_type(&self) -> SourceType {
        SourceType::Article
    }

    async fn extract(&self, job: &Job) -> ExtractedContent {
        match self.try_extract(&job.url).await {
            Ok(content) => content,
            Err(e) => {
                warn!("Article extraction failed, using stub content: {}", e);
                ExtractedContent {
                    title: "Article".to_string(),
                    body: format!("Article: {}", job.url),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractionSettings;

    fn extractor() -> ArticleExtractor {
        ArticleExtractor::new(&ExtractionSettings::default())
    }

    #[test]
    fn test_title_extraction() {
        let e = extractor();
        let html = "<html><head><TITLE>Test Page</TITLE></head><body>hi</body></html>";
        let title = e
            .title_regex
            .captures(html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string());
        assert_eq!(title, Some("Test Page".to_string()));
    }

    #[test]
    fn test_title_missing() {
        let e = extractor();
        assert!(e.title_regex.captures("<html><body>no title</body></html>").is_none());
    }

    #[tokio::test]
    async fn test_unreachable_url_degrades_to_stub() {
        let e = extractor();
        let job = Job {
            source_id: 1,
            url: "http://127.0.0.1:1/never".to_string(),
            source_type: SourceType::Article,
            model: "meta-llama/llama-3-8b-instruct".to_string(),
        };

        let content = e.extract(&job).await;
        assert_eq!(content.title, "Article");
        assert!(content.body.contains("http://127.0.0.1:1/never"));
    }
}
