use serde::{Deserialize, Serialize};

use crate::lenient;

/// Content platform an item was collected from.
///
/// Parsed case-insensitively; anything unrecognised is kept verbatim in
/// [`Platform::Other`] so the scorer can fall back to its default weight.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    YouTube,
    Reddit,
    TikTok,
    Other(String),
}

impl Platform {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "youtube" | "yt" => Platform::YouTube,
            "reddit" => Platform::Reddit,
            "tiktok" => Platform::TikTok,
            _ => Platform::Other(raw.trim().to_string()),
        }
    }

    /// Lowercase lookup key used by the platform weight table.
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Platform::YouTube => "youtube".to_string(),
            Platform::Reddit => "reddit".to_string(),
            Platform::TikTok => "tiktok".to_string(),
            Platform::Other(name) => name.trim().to_lowercase(),
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Platform::Other(String::new())
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Platform::YouTube => "YouTube",
            Platform::Reddit => "Reddit",
            Platform::TikTok => "TikTok",
            Platform::Other(name) => name.as_str(),
        };
        f.pad(name)
    }
}

impl From<String> for Platform {
    fn from(raw: String) -> Self {
        Platform::parse(&raw)
    }
}

impl From<&str> for Platform {
    fn from(raw: &str) -> Self {
        Platform::parse(raw)
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.to_string()
    }
}

/// Raw engagement counters reported by the acquisition layer.
///
/// Counts are signed so malformed negative values survive deserialization and
/// can be clamped by the aggregator instead of failing the whole item.
/// Fractional counts are rounded and `null` reads as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Engagement {
    #[serde(deserialize_with = "lenient::count")]
    pub supportive_count: i64,
    #[serde(deserialize_with = "lenient::count")]
    pub ridicule_count: i64,
    #[serde(deserialize_with = "lenient::count")]
    pub repost_count: i64,
    /// Expected in `[0.0, 1.0]`.
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub posting_frequency: f32,
}

/// One item as handed over by a platform fetcher. Every field is optional on
/// input and an explicit `null` reads as the field's default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawItem {
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub title: String,
    #[serde(alias = "description", deserialize_with = "lenient::null_as_default")]
    pub body: String,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub platform: Platform,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub comments: Vec<String>,
    #[serde(deserialize_with = "lenient::null_as_default")]
    pub engagement: Engagement,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl RawItem {
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>, platform: Platform) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            platform,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_comments<I, S>(mut self, comments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.comments = comments.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_engagement(mut self, engagement: Engagement) -> Self {
        self.engagement = engagement;
        self
    }

    /// Title and body joined by a single space, the text the keyword classifiers see.
    #[must_use]
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_parse_is_case_insensitive() {
        assert_eq!(Platform::parse("YouTube"), Platform::YouTube);
        assert_eq!(Platform::parse("  reddit "), Platform::Reddit);
        assert_eq!(Platform::parse("TIKTOK"), Platform::TikTok);
    }

    #[test]
    fn platform_unknown_keeps_name() {
        let p = Platform::parse("Mastodon");
        assert_eq!(p, Platform::Other("Mastodon".to_string()));
        assert_eq!(p.key(), "mastodon");
        assert_eq!(p.to_string(), "Mastodon");
    }

    #[test]
    fn raw_item_deserializes_with_all_fields_missing() {
        let item: RawItem = serde_json::from_str("{}").unwrap();
        assert!(item.title.is_empty());
        assert!(item.comments.is_empty());
        assert_eq!(item.engagement, Engagement::default());
        assert_eq!(item.platform, Platform::default());
    }

    #[test]
    fn raw_item_accepts_description_alias() {
        let item: RawItem = serde_json::from_str(
            r#"{"title": "t", "description": "d", "platform": "Reddit",
                "engagement": {"repost_count": 3}}"#,
        )
        .unwrap();
        assert_eq!(item.body, "d");
        assert_eq!(item.platform, Platform::Reddit);
        assert_eq!(item.engagement.repost_count, 3);
        assert_eq!(item.engagement.supportive_count, 0);
    }

    #[test]
    fn raw_item_tolerates_nulls_and_fractional_counts() {
        let item: RawItem = serde_json::from_str(
            r#"{"title": null, "comments": null, "platform": null,
                "engagement": {"repost_count": 2.5, "ridicule_count": null,
                               "posting_frequency": null}}"#,
        )
        .unwrap();
        assert!(item.title.is_empty());
        assert!(item.comments.is_empty());
        assert_eq!(item.platform, Platform::default());
        assert_eq!(item.engagement.repost_count, 3);
        assert_eq!(item.engagement.ridicule_count, 0);
        assert_eq!(item.engagement.posting_frequency, 0.0);
    }

    #[test]
    fn raw_item_saturates_oversized_counts() {
        let item: RawItem = serde_json::from_str(
            r#"{"engagement": {"supportive_count": 99999999999999999999}}"#,
        )
        .unwrap();
        assert_eq!(item.engagement.supportive_count, i64::MAX);
    }

    #[test]
    fn platform_serializes_as_display_name() {
        let json = serde_json::to_string(&Platform::TikTok).unwrap();
        assert_eq!(json, "\"TikTok\"");
    }

    #[test]
    fn text_joins_title_and_body_with_single_space() {
        let item = RawItem::new("My testimony", "I was healed", Platform::YouTube);
        assert_eq!(item.text(), "My testimony I was healed");
    }
}
