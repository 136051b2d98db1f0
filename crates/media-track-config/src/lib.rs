pub mod appearance;
pub mod config;
pub mod credentials;
pub mod paths;

pub use appearance::{detect_system_theme, theme_from_colorfgbg};
pub use config::{Config, ConfigError, LoggingConfig, RawgConfig, SearchConfig, TmdbConfig, DEFAULT_RAWG_BASE_URL, DEFAULT_TMDB_BASE_URL};
pub use credentials::{ApiKeys, CredentialStore};
pub use paths::{PathManager, home_override};
