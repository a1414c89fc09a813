//! Content source abstraction for Lekse.
//!
//! Provides a trait-based interface for the different source variants
//! (articles, YouTube videos, and everything else).

mod article;
mod generic;
mod youtube;

pub use article::ArticleExtractor;
pub use generic::GenericExtractor;
pub use youtube::YoutubeExtractor;

use crate::config::{Credentials, Settings};
use crate::pipeline::Job;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Type of content source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Article,
    Youtube,
    Podcast,
    Social,
    Forum,
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceType::Article => write!(f, "article"),
            SourceType::Youtube => write!(f, "youtube"),
            SourceType::Podcast => write!(f, "podcast"),
            SourceType::Social => write!(f, "social"),
            SourceType::Forum => write!(f, "forum"),
        }
    }
}

impl std::str::FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "article" => Ok(SourceType::Article),
            "youtube" => Ok(SourceType::Youtube),
            "podcast" => Ok(SourceType::Podcast),
            "social" => Ok(SourceType::Social),
            "forum" => Ok(SourceType::Forum),
            _ => Err(format!("Unknown source type: {}", s)),
        }
    }
}

/// Raw content pulled out of a source, ready for summarization.
///
/// Owned by a single pipeline invocation; the body is unbounded and is
/// truncated downstream before it reaches the summarization prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedContent {
    /// Human-readable title.
    pub title: String,
    /// Raw textual content.
    pub body: String,
}

/// Trait for source content extractors.
///
/// `extract` is total: fetch and parse failures degrade to a stub naming
/// the URL so the pipeline always has something to summarize.
#[async_trait]
pub trait ContentExtractor: Send + Sync {
    /// Get the source type this extractor handles.
    fn source_type(&self) -> SourceType;

    /// Extract content and a title for the given job.
    async fn extract(&self, job: &Job) -> ExtractedContent;
}

/// Select the extractor for a source type.
///
/// Every declared source type maps to an extractor; podcast, social, and
/// forum sources share the generic stub variant until they grow real
/// implementations.
pub fn extractor_for(
    source_type: SourceType,
    settings: &Settings,
    credentials: &Credentials,
) -> Box<dyn ContentExtractor> {
    match source_type {
        SourceType::Article => Box::new(ArticleExtractor::new(&settings.extraction)),
        SourceType::Youtube => {
            Box::new(YoutubeExtractor::new(credentials.youtube_api_key.clone()))
        }
        other => Box::new(GenericExtractor::new(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_type_round_trip() {
        for s in ["article", "youtube", "podcast", "social", "forum"] {
            let parsed: SourceType = s.parse().unwrap();
            assert_eq!(parsed.to_string(), s);
        }
        assert!("rss".parse::<SourceType>().is_err());
    }

    #[test]
    fn test_every_source_type_has_an_extractor() {
        let settings = Settings::default();
        let credentials = Credentials::default();

        for st in [
            SourceType::Article,
            SourceType::Youtube,
            SourceType::Podcast,
            SourceType::Social,
            SourceType::Forum,
        ] {
            let extractor = extractor_for(st, &settings, &credentials);
            assert_eq!(extractor.source_type(), st);
        }
    }
}
