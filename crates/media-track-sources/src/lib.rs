pub mod error;
pub mod http;
pub mod rawg;
pub mod registry;
pub mod tmdb;
pub mod traits;

pub use error::SourceError;
pub use rawg::RawgClient;
pub use registry::CatalogRegistry;
pub use tmdb::TmdbClient;
pub use traits::CatalogSource;
