//! Picks the catalog that matches the active view mode.

use media_track_config::{ApiKeys, Config};
use media_track_models::{SearchResult, ViewMode};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::error::SourceError;
use crate::http::create_catalog_client;
use crate::rawg::RawgClient;
use crate::tmdb::TmdbClient;
use crate::traits::CatalogSource;

#[derive(Clone, Default)]
pub struct CatalogRegistry {
    sources: HashMap<ViewMode, Arc<dyn CatalogSource>>,
}

impl CatalogRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the TMDB and RAWG clients sharing one HTTP connection pool.
    pub fn from_config(config: &Config, keys: &ApiKeys) -> Self {
        let client = Arc::new(create_catalog_client(Duration::from_secs(config.search.timeout_secs)));

        let tmdb = TmdbClient::new(client.clone(), config.tmdb.base_url.clone(), keys.tmdb.clone());
        let rawg = RawgClient::new(client, config.rawg.base_url.clone(), keys.rawg.clone());

        if !tmdb.has_api_key() {
            warn!("TMDB API key not configured; movie search will return no results");
        }
        if !rawg.has_api_key() {
            warn!("RAWG API key not configured; game search will return no results");
        }

        let mut registry = Self::new();
        registry.register(Arc::new(tmdb));
        registry.register(Arc::new(rawg));
        registry
    }

    /// Registers `source` for its view mode, replacing any previous one.
    pub fn register(&mut self, source: Arc<dyn CatalogSource>) {
        info!(source = source.source_name(), mode = %source.view_mode(), "Registered catalog source");
        self.sources.insert(source.view_mode(), source);
    }

    pub fn source(&self, mode: ViewMode) -> Option<&Arc<dyn CatalogSource>> {
        self.sources.get(&mode)
    }

    pub async fn search(&self, query: &str, mode: ViewMode) -> Result<Vec<SearchResult>, SourceError> {
        match self.source(mode) {
            Some(source) => source.search(query).await,
            None => {
                warn!(mode = %mode, "No catalog source registered");
                Ok(Vec::new())
            }
        }
    }

    /// Search whose failures are logged and surface as no results.
    pub async fn search_or_empty(&self, query: &str, mode: ViewMode) -> Vec<SearchResult> {
        match self.search(query, mode).await {
            Ok(results) => {
                info!(mode = %mode, count = results.len(), "Search completed");
                results
            }
            Err(e) => {
                error!(mode = %mode, error = %e, "Search failed");
                Vec::new()
            }
        }
    }
}
