//! GraphQL content API client.
//!
//! # Responsibilities
//! - Execute the story page query against the configured endpoint
//! - Map GraphQL envelopes (data / errors) onto `FetchError`
//! - Enforce a per-request timeout; no retries

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use url::Url;

use crate::config::GraphQlConfig;
use crate::content::fetcher::{ContentFetcher, FetchError, StoryQuery};
use crate::content::types::ContentItem;
use crate::http::X_REQUEST_ID;

/// The story page query document.
pub const STORY_PAGE_QUERY: &str = include_str!("queries/story.graphql");

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoryPageData {
    published_story: Option<ContentItem>,
}

/// Fetches stories from the GraphQL content API.
#[derive(Debug, Clone)]
pub struct GraphQlFetcher {
    client: reqwest::Client,
    endpoint: Url,
}

impl GraphQlFetcher {
    /// Create a new client for the configured endpoint.
    pub fn new(config: &GraphQlConfig) -> Result<Self, FetchError> {
        let endpoint = Url::parse(&config.uri).map_err(|source| FetchError::Endpoint {
            uri: config.uri.clone(),
            source,
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        tracing::info!(endpoint = %endpoint, timeout_ms = config.timeout_ms, "GraphQL client initialized");

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ContentFetcher for GraphQlFetcher {
    async fn fetch_story(&self, query: &StoryQuery) -> Result<ContentItem, FetchError> {
        let body = json!({
            "query": STORY_PAGE_QUERY,
            "variables": {
                "input": { "id": query.id, "preview": query.preview },
                "publisherId": query.publisher_id,
            },
        });

        let mut request = self.client.post(self.endpoint.clone()).json(&body);
        if let Some(request_id) = &query.request_id {
            request = request.header(X_REQUEST_ID, request_id);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(story_id = %query.id, status = %status, "Content API returned an error status");
            return Err(FetchError::Status(status.as_u16()));
        }

        let envelope: GraphQlResponse<StoryPageData> = response.json().await?;
        if !envelope.errors.is_empty() {
            let messages = envelope
                .errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(FetchError::Query(messages));
        }

        let story = envelope
            .data
            .and_then(|data| data.published_story)
            .ok_or_else(|| FetchError::NotFound(query.id.clone()))?;

        if story.url.trim().is_empty() {
            return Err(FetchError::Invalid(format!(
                "story '{}' has no canonical URL",
                story.id
            )));
        }

        tracing::debug!(story_id = %story.id, preview = query.preview, "Story fetched");
        Ok(story)
    }
}
