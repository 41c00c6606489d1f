//! Story types as returned by the content API.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A published story.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,

    /// Canonical URL the story should be accessed at.
    pub url: String,

    #[serde(default)]
    pub path: String,

    pub title: String,

    #[serde(default)]
    pub teaser: Option<String>,

    /// Story body as HTML.
    #[serde(default)]
    pub body: Option<String>,

    #[serde(default)]
    pub primary_image: Option<ImageRef>,

    #[serde(with = "timestamp")]
    pub published_at: DateTime<Utc>,

    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,

    pub publisher: PublisherRef,

    pub advertiser: AdvertiserRef,
}

impl ContentItem {
    /// The primary image source, if the story has a non-empty one.
    pub fn image_src(&self) -> Option<&str> {
        self.primary_image
            .as_ref()
            .and_then(|image| image.src.as_deref())
            .filter(|src| !src.is_empty())
    }

    pub fn description(&self) -> &str {
        self.teaser.as_deref().unwrap_or_default()
    }

    pub fn published_time(&self) -> String {
        format_timestamp(&self.published_at)
    }

    pub fn modified_time(&self) -> String {
        format_timestamp(&self.updated_at)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImageRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PublisherRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AdvertiserRef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// RFC 3339 in UTC with millisecond precision (`2019-05-01T12:00:00.000Z`).
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Dates arrive either as epoch milliseconds or as RFC 3339 strings.
mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(i64),
        Text(String),
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_timestamp(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Millis(ms) => DateTime::from_timestamp_millis(ms)
                .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {ms}"))),
            Raw::Text(text) => DateTime::parse_from_rfc3339(&text)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| de::Error::custom(format!("invalid timestamp '{text}': {e}"))),
        }
    }
}
