//! Generic stub extractor for source types without a real implementation.

use super::{ContentExtractor, ExtractedContent, SourceType};
use crate::pipeline::Job;
use async_trait::async_trait;

/// Fallback extractor for podcast, social, and forum sources.
///
/// Performs no network fetch; the content is a stub naming the source type
/// and URL so the pipeline stays total over all declared source types.
pub struct GenericExtractor {
    source_type: SourceType,
}

impl GenericExtractor {
    pub fn new(source_type: SourceType) -> Self {
        Self { source_type }
    }
}

#[async_trait]
impl ContentExtractor for GenericExtractor {
    fn source_type(&self) -> SourceType {
        self.source_type
    }

    async fn extract(&self, job: &Job) -> ExtractedContent {
        ExtractedContent {
            title: self.source_type.to_string(),
            body: format!("Content from {}: {}", self.source_type, job.url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stub_content() {
        let extractor = GenericExtractor::new(SourceType::Podcast);
        let job = Job {
            source_id: 7,
            url: "https://example.com/feed".to_string(),
            source_type: SourceType::Podcast,
            model: "meta-llama/llama-3-8b-instruct".to_string(),
        };

        let content = extractor.extract(&job).await;
        assert_eq!(content.title, "podcast");
        assert_eq!(content.body, "Content from podcast: https://example.com/feed");
    }
}
