use media_track_models::{ResultDetails, SearchResult};
use reqwest::Client;
use serde::Deserialize;

use crate::error::SourceError;
use crate::http::{endpoint, fetch_json};
use crate::tmdb::api::release_year;

pub(crate) const SOURCE_NAME: &str = "rawg";

#[derive(Debug, Deserialize)]
pub(crate) struct RawgSearchResponse {
    #[serde(default)]
    pub results: Vec<RawgGame>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawgGame {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub released: Option<String>,
    #[serde(default)]
    pub platforms: Option<Vec<RawgPlatformEntry>>,
    #[serde(default)]
    pub developers: Option<Vec<RawgNamed>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawgPlatformEntry {
    pub platform: RawgNamed,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawgNamed {
    #[serde(default)]
    pub name: String,
}

impl From<RawgGame> for SearchResult {
    fn from(game: RawgGame) -> Self {
        let platform = game
            .platforms
            .unwrap_or_default()
            .into_iter()
            .map(|entry| entry.platform.name)
            .collect::<Vec<_>>()
            .join(", ");

        // Search results usually omit developers; take the first when present
        let developer = game
            .developers
            .and_then(|devs| devs.into_iter().next())
            .map(|dev| dev.name)
            .unwrap_or_default();

        SearchResult {
            external_id: game.id.to_string(),
            title: game.name.unwrap_or_default(),
            release_date: release_year(game.released.as_deref()),
            details: ResultDetails::Game { developer, platform },
        }
    }
}

/// `GET /games?key=<key>&search=<q>`
pub async fn search_games(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
) -> Result<Vec<SearchResult>, SourceError> {
    let url = endpoint(base_url, "games");
    let request = client.get(&url).query(&[("key", api_key), ("search", query)]);

    let response: RawgSearchResponse = fetch_json(SOURCE_NAME, request).await?;
    Ok(response.results.into_iter().map(SearchResult::from).collect())
}
