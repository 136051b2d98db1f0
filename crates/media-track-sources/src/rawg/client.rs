use async_trait::async_trait;
use media_track_models::{SearchResult, ViewMode};
use reqwest::Client;
use std::sync::Arc;
use tracing::debug;

use crate::error::SourceError;
use crate::rawg::api;
use crate::traits::CatalogSource;

/// Game search against RAWG.
#[derive(Clone)]
pub struct RawgClient {
    client: Arc<Client>,
    base_url: String,
    api_key: Option<String>,
}

impl RawgClient {
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
impl CatalogSource for RawgClient {
    fn source_name(&self) -> &str {
        api::SOURCE_NAME
    }

    fn view_mode(&self) -> ViewMode {
        ViewMode::Games
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError> {
        let api_key = self.api_key()?;
        debug!(query, "Searching RAWG");
        api::search_games(&self.client, &self.base_url, api_key, query.trim()).await
    }
}
