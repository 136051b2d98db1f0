use async_trait::async_trait;
use media_track_models::{SearchResult, ViewMode};

use crate::error::SourceError;

/// A read-only external catalog searched while adding items.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    fn source_name(&self) -> &str;

    /// The view mode whose items this catalog describes.
    fn view_mode(&self) -> ViewMode;

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError>;
}
