//! Content fetcher contract.

use async_trait::async_trait;
use thiserror::Error;

use crate::content::types::ContentItem;

/// Parameters of a story lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryQuery {
    pub id: String,
    /// Bypass publication-state checks.
    pub preview: bool,
    pub publisher_id: Option<String>,
    /// Correlation id forwarded to the content API.
    pub request_id: Option<String>,
}

impl StoryQuery {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

/// Errors that can occur while fetching content.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No story matches the requested id.
    #[error("No story was found for id '{0}'")]
    NotFound(String),

    /// Connection, timeout or decode failure.
    #[error("Content API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Content API answered with a non-success status.
    #[error("Content API responded with status {0}")]
    Status(u16),

    /// Content API reported query errors.
    #[error("Content API query failed: {0}")]
    Query(String),

    /// The configured endpoint is not a usable URL.
    #[error("Invalid GraphQL endpoint '{uri}': {source}")]
    Endpoint {
        uri: String,
        #[source]
        source: url::ParseError,
    },

    /// Content API returned a story that breaks an invariant.
    #[error("Content API returned an invalid story: {0}")]
    Invalid(String),
}

impl FetchError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::NotFound(_) => "not_found",
            FetchError::Transport(_) => "transport",
            FetchError::Status(_) => "status",
            FetchError::Query(_) => "query",
            FetchError::Endpoint { .. } => "endpoint",
            FetchError::Invalid(_) => "invalid",
        }
    }
}

/// Source of published stories.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch_story(&self, query: &StoryQuery) -> Result<ContentItem, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FetchError::NotFound("abc".into());
        assert_eq!(err.to_string(), "No story was found for id 'abc'");
        assert_eq!(err.kind(), "not_found");

        let err = FetchError::Status(503);
        assert_eq!(err.to_string(), "Content API responded with status 503");
    }

    #[test]
    fn test_story_query_new() {
        let query = StoryQuery::new("abc");
        assert_eq!(query.id, "abc");
        assert!(!query.preview);
        assert!(query.publisher_id.is_none());
    }
}
