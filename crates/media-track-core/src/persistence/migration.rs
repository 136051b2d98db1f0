use chrono::{DateTime, TimeZone, Utc};
use media_track_models::{Collection, ItemId, MediaDetails, Theme, TrackedItem, ViewMode};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
#[serde(untagged)]
enum LegacyId {
    Text(String),
    Number(i64),
}

/// Item shape of schema version 0: untagged, camelCase, `addedAt` in epoch ms.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyItem {
    id: LegacyId,
    title: String,
    #[serde(default)]
    added_at: Option<i64>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    director: Option<String>,
    #[serde(default)]
    genre: Option<String>,
    #[serde(default)]
    developer: Option<String>,
    #[serde(default)]
    platform: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl LegacyItem {
    /// The collection that held the item decides its kind.
    fn into_tracked(self, mode: ViewMode) -> TrackedItem {
        let id = match self.id {
            LegacyId::Text(text) => text,
            LegacyId::Number(n) => n.to_string(),
        };
        let added_millis = self.added_at.or_else(|| id.parse::<i64>().ok());
        let added_at: DateTime<Utc> = added_millis
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
            .unwrap_or_default();

        let details = match mode {
            ViewMode::Movies => MediaDetails::Movie {
                director: non_empty(self.director),
                genre: non_empty(self.genre),
            },
            ViewMode::Games => MediaDetails::Game {
                developer: non_empty(self.developer),
                platform: non_empty(self.platform),
            },
        };

        TrackedItem {
            id: ItemId::new(id),
            title: self.title,
            added_at,
            release_date: non_empty(self.release_date),
            details,
        }
    }
}

pub(super) fn collection_from_v0(data: Value, mode: ViewMode) -> Result<Collection, serde_json::Error> {
    let items: Vec<LegacyItem> = serde_json::from_value(data)?;
    Ok(Collection::from_items(
        items.into_iter().map(|item| item.into_tracked(mode)).collect(),
    ))
}

pub(super) fn theme_from_v0(data: Value) -> Result<Theme, serde_json::Error> {
    let dark: bool = serde_json::from_value(data)?;
    Ok(Theme::from_dark_flag(dark))
}
