use media_track_models::{ResultDetails, SearchResult};
use reqwest::Client;
use serde::Deserialize;

use crate::error::SourceError;
use crate::http::{endpoint, fetch_json};

pub(crate) const SOURCE_NAME: &str = "tmdb";

#[derive(Debug, Deserialize)]
pub(crate) struct TmdbSearchResponse {
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TmdbMovie {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

/// TMDB movie genre ids as published by `/genre/movie/list`.
fn genre_name(id: u32) -> Option<&'static str> {
    let name = match id {
        28 => "Action",
        12 => "Adventure",
        16 => "Animation",
        35 => "Comedy",
        80 => "Crime",
        99 => "Documentary",
        18 => "Drama",
        10751 => "Family",
        14 => "Fantasy",
        36 => "History",
        27 => "Horror",
        10402 => "Music",
        9648 => "Mystery",
        10749 => "Romance",
        878 => "Science Fiction",
        10770 => "TV Movie",
        53 => "Thriller",
        10752 => "War",
        37 => "Western",
        _ => return None,
    };
    Some(name)
}

/// Year part of a `YYYY-MM-DD` date, or empty.
pub(crate) fn release_year(date: Option<&str>) -> String {
    date.and_then(|d| d.split('-').next())
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

impl From<TmdbMovie> for SearchResult {
    fn from(movie: TmdbMovie) -> Self {
        let genre = movie
            .genre_ids
            .iter()
            .filter_map(|id| genre_name(*id))
            .collect::<Vec<_>>()
            .join(", ");

        SearchResult {
            external_id: movie.id.to_string(),
            title: movie.title.unwrap_or_default(),
            release_date: release_year(movie.release_date.as_deref()),
            // Director needs a credits lookup per movie; left for the user to fill in
            details: ResultDetails::Movie { director: String::new(), genre },
        }
    }
}

/// `GET /search/movie?api_key=<key>&query=<q>`
pub async fn search_movies(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
) -> Result<Vec<SearchResult>, SourceError> {
    let url = endpoint(base_url, "search/movie");
    let request = client.get(&url).query(&[("api_key", api_key), ("query", query)]);

    let response: TmdbSearchResponse = fetch_json(SOURCE_NAME, request).await?;
    Ok(response.results.into_iter().map(SearchResult::from).collect())
}
