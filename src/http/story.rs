//! Story page handler.
//!
//! Fetch → canonical redirect check → metadata + tracking → HTML.

use axum::{
    extract::{OriginalUri, Path, RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;

use crate::content::{ContentItem, StoryQuery};
use crate::http::request::{query_flag, query_pairs, query_value, request_id, RequestOrigin};
use crate::http::response::AppError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::seo::{compose, MetadataSet, RedirectDecision};
use crate::templates;
use crate::tracking::TrackerContext;

#[derive(Serialize)]
struct StoryPage<'a> {
    title: &'a str,
    meta: MetadataSet,
    story: &'a ContentItem,
    image_src: Option<&'a str>,
    preview: bool,
    data_layer: String,
    gtm_container_id: Option<&'a str>,
}

/// `GET /story/{id}`
pub async fn story_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    OriginalUri(uri): OriginalUri,
    RawQuery(raw_query): RawQuery,
    origin: RequestOrigin,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let pairs = query_pairs(raw_query.as_deref());
    let query = StoryQuery {
        id,
        preview: query_flag(&pairs, "preview"),
        publisher_id: query_value(&pairs, "publisherId").map(str::to_string),
        request_id: request_id(&headers).map(str::to_string),
    };

    let story = match state.fetcher.fetch_story(&query).await {
        Ok(story) => {
            metrics::record_story_fetch("found");
            story
        }
        Err(e) => {
            metrics::record_story_fetch(e.kind());
            return Err(e.into());
        }
    };

    let requested_url = origin.url_for(uri.path());
    let decision = state.resolver.resolve(&requested_url, &pairs, &story.url);
    metrics::record_redirect(decision.label());
    if let RedirectDecision::Redirect { location } = decision {
        return Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response());
    }

    let tracker = TrackerContext::for_story(&story, query.preview);
    let page = StoryPage {
        title: &story.title,
        meta: compose(&story),
        story: &story,
        image_src: story.image_src(),
        preview: query.preview,
        data_layer: tracker.page_load_script_json()?,
        gtm_container_id: state.config.tracking.gtm_container_id.as_deref(),
    };

    let html = state.templates.render(templates::STORY, &page)?;
    Ok(Html(html).into_response())
}
