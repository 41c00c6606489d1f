//! SEO and social metadata for story pages.

use serde::Serialize;

use crate::content::ContentItem;

pub const OG_LOCALE: &str = "en_US";
pub const OG_TYPE: &str = "article";
pub const TWITTER_CARD: &str = "summary";

/// Keys emitted only when the story has a primary image.
pub const IMAGE_KEYS: [&str; 3] = ["image", "twitter:image:src", "og:image"];

/// How a metadata entry is rendered into the document head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    /// `<link rel="{key}" href="{value}">`
    Link,
    /// `<meta name="{key}" content="{value}">`
    Meta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaTag {
    pub kind: TagKind,
    pub key: String,
    pub value: String,
}

/// Ordered mapping of metadata keys to values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MetadataSet {
    tags: Vec<MetaTag>,
}

impl MetadataSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a `<meta>` entry. An existing key keeps its position and takes the new value.
    pub fn meta(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.insert(TagKind::Meta, key.into(), value.into())
    }

    /// Insert a `<link>` entry.
    pub fn link(&mut self, rel: impl Into<String>, href: impl Into<String>) -> &mut Self {
        self.insert(TagKind::Link, rel.into(), href.into())
    }

    fn insert(&mut self, kind: TagKind, key: String, value: String) -> &mut Self {
        match self.tags.iter_mut().find(|tag| tag.key == key) {
            Some(tag) => {
                tag.kind = kind;
                tag.value = value;
            }
            None => self.tags.push(MetaTag { kind, key, value }),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.key == key)
            .map(|tag| tag.value.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|tag| tag.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetaTag> {
        self.tags.iter()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Build the head metadata for a story.
pub fn compose(item: &ContentItem) -> MetadataSet {
    let description = item.description();
    let image = item.image_src();
    let mut set = MetadataSet::new();

    // SEO
    set.link("canonical", &item.url).meta("description", description);
    if let Some(src) = image {
        set.meta("image", src);
    }

    // Twitter
    set.meta("twitter:card", TWITTER_CARD)
        .meta("twitter:title", &item.title)
        .meta("twitter:description", description);
    if let Some(src) = image {
        set.meta("twitter:image:src", src);
    }

    // OpenGraph
    set.meta("og:title", &item.title)
        .meta("og:description", description);
    if let Some(src) = image {
        set.meta("og:image", src);
    }
    set.meta("og:url", &item.url)
        .meta("og:site_name", &item.publisher.name)
        .meta("og:locale", OG_LOCALE)
        .meta("og:type", OG_TYPE)
        .meta("article:published_time", item.published_time())
        .meta("article:modified_time", item.modified_time())
        .meta("native-x:publisher", &item.publisher.name);

    set
}
