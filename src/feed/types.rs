//! Feed domain and wire types

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named feed partition with its own page sequence on the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Most recent posts
    #[default]
    Latest,
    /// Currently trending posts
    Hot,
    /// Best rated posts
    Top,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 3] = [Category::Latest, Category::Hot, Category::Top];

    /// Path segment used by the backend for this category
    pub fn path_segment(self) -> &'static str {
        match self {
            Category::Latest => "latest",
            Category::Hot => "hot",
            Category::Top => "top",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.path_segment().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::invalid_value("category", format!("unknown category '{s}'")))
    }
}

/// One displayable feed entry
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub description: String,
    pub media_url: String,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        media_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            media_url: media_url.into(),
        }
    }
}

/// A record as the backend sends it; every field may be missing
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "gifURL", default)]
    pub gif_url: Option<String>,
}

impl From<RawRecord> for Item {
    fn from(record: RawRecord) -> Self {
        Self {
            id: record.id.unwrap_or_default(),
            description: record.description.unwrap_or_default(),
            media_url: record.gif_url.unwrap_or_default(),
        }
    }
}

/// Body of a page response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedPage {
    /// Records on this page; null or absent means an empty page
    #[serde(default)]
    pub result: Option<Vec<RawRecord>>,
    /// Size of the whole category as reported by the host
    #[serde(rename = "totalCount", default)]
    pub total_count: Option<u64>,
}

impl FeedPage {
    pub fn into_records(self) -> Vec<RawRecord> {
        self.result.unwrap_or_default()
    }
}

/// The backend sends numeric ids; accept both numbers and strings.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde_json::Value;

    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    })
}
