//! Analytics page-load context.
//!
//! The tracker itself runs client side; the server only emits the
//! data-layer payload describing the rendered story.

use serde::Serialize;

use crate::content::ContentItem;

/// Data-layer event name pushed on page load.
pub const PAGE_LOAD_EVENT: &str = "story_page_load";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackerContext {
    pub story_id: String,
    pub page_path: String,
    pub page_title: String,
    pub publisher_id: String,
    pub advertiser_id: String,
    pub preview_mode: bool,
}

#[derive(Serialize)]
struct PageLoad<'a> {
    event: &'static str,
    #[serde(flatten)]
    context: &'a TrackerContext,
}

impl TrackerContext {
    pub fn for_story(item: &ContentItem, preview: bool) -> Self {
        Self {
            story_id: item.id.clone(),
            page_path: item.path.clone(),
            page_title: item.title.clone(),
            publisher_id: item.publisher.id.clone(),
            advertiser_id: item.advertiser.id.clone(),
            preview_mode: preview,
        }
    }

    /// Page-load event as JSON safe to embed inside a `<script>` element.
    pub fn page_load_script_json(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string(&PageLoad {
            event: PAGE_LOAD_EVENT,
            context: self,
        })?;
        Ok(script_safe(&json))
    }
}

/// Escape sequences that would end or break an inline script.
fn script_safe(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}
