use async_trait::async_trait;
use media_track_models::{SearchResult, ViewMode};
use reqwest::Client;
use std::sync::Arc;
use tracing::debug;

use crate::error::SourceError;
use crate::tmdb::api;
use crate::traits::CatalogSource;

/// Movie search against The Movie Database.
#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: Option<String>,
}

impl TmdbClient {
    pub fn new(client: Arc<Client>, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> Result<&str, SourceError> {
        self.api_key
            .as_deref()
            .ok_or(SourceError::MissingApiKey { source_name: api::SOURCE_NAME })
    }
}

#[async_trait]
impl CatalogSource for TmdbClient {
    fn source_name(&self) -> &str {
        api::SOURCE_NAME
    }

    fn view_mode(&self) -> ViewMode {
        ViewMode::Movies
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError> {
        let api_key = self.api_key()?;
        debug!(query, "Searching TMDB");
        api::search_movies(&self.client, &self.base_url, api_key, query.trim()).await
    }
}
