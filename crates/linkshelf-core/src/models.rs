//! Data models for linkshelf
//!
//! Defines the link record and its identifier. The JSON shape matches the
//! collections written by the original browser widget, so backups can move
//! between the two in either direction.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Unique identifier of a link
///
/// New ids are random UUIDs. Collections exported by the browser widget use
/// millisecond timestamps as numeric ids; those are accepted on input and
/// kept as their decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LinkId(String);

impl LinkId {
    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for LinkId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for LinkId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl<'de> Deserialize<'de> for LinkId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Number(n) => Self(n.to_string()),
        })
    }
}

/// A saved link
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Link {
    /// Unique identifier
    pub id: LinkId,
    /// The URL
    pub url: String,
    /// Display title, the URL itself when none was given
    pub title: String,
    /// Tags, in the order they were entered (duplicates allowed)
    #[serde(default)]
    pub tags: Vec<String>,
    /// When this link was created, as ISO-8601 text
    ///
    /// Kept verbatim so imported records export unchanged. New links use
    /// `2024-05-01T09:30:00.000Z`.
    pub timestamp: String,
}

impl Link {
    /// Create a new link from form-style input
    ///
    /// An empty title falls back to the URL. `raw_tags` is a comma-separated
    /// list, see [`parse_tags`].
    pub fn new(url: impl Into<String>, title: &str, raw_tags: &str) -> Self {
        let url = url.into();
        Self {
            id: LinkId::generate(),
            title: title_or_url(title, &url),
            url,
            tags: parse_tags(raw_tags),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Check whether the title, URL or any tag contains `needle`
    ///
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.url.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }

    /// Drop blank tag entries
    pub(crate) fn strip_blank_tags(&mut self) {
        self.tags.retain(|t| !t.trim().is_empty());
    }
}

/// Split a comma-separated tag list
///
/// Each piece is trimmed and empty pieces are dropped. Order and duplicates
/// are kept.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

fn title_or_url(title: &str, url: &str) -> String {
    if title.is_empty() {
        url.to_string()
    } else {
        title.to_string()
    }
}
