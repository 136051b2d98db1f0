use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::view_mode::ViewMode;

/// Identifier of a tracked item, unique within its collection.
///
/// Generated from the creation time in epoch milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn from_millis(millis: i64) -> Self {
        Self(millis.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Mode-specific metadata of a tracked item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MediaDetails {
    Movie {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        director: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        genre: Option<String>,
    },
    Game {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        developer: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        platform: Option<String>,
    },
}

impl MediaDetails {
    pub fn empty(mode: ViewMode) -> Self {
        match mode {
            ViewMode::Movies => MediaDetails::Movie { director: None, genre: None },
            ViewMode::Games => MediaDetails::Game { developer: None, platform: None },
        }
    }

    pub fn view_mode(&self) -> ViewMode {
        match self {
            MediaDetails::Movie { .. } => ViewMode::Movies,
            MediaDetails::Game { .. } => ViewMode::Games,
        }
    }

    /// Labelled, non-empty metadata fields in display order.
    pub fn labelled_fields(&self) -> Vec<(&'static str, &str)> {
        let (first, second) = match self {
            MediaDetails::Movie { director, genre } => {
                (("Director", director.as_deref()), ("Genre", genre.as_deref()))
            }
            MediaDetails::Game { developer, platform } => {
                (("Developer", developer.as_deref()), ("Platform", platform.as_deref()))
            }
        };
        [first, second]
            .into_iter()
            .filter_map(|(label, value)| value.filter(|v| !v.is_empty()).map(|v| (label, v)))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackedItem {
    pub id: ItemId,
    pub title: String,
    pub added_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(flatten)]
    pub details: MediaDetails,
}

impl TrackedItem {
    pub fn view_mode(&self) -> ViewMode {
        self.details.view_mode()
    }
}
