use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_RAWG_BASE_URL: &str = "https://api.rawg.io/api";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("search.debounce_ms must be greater than zero")]
    ZeroDebounce,
    #[error("search.min_query_len must be greater than zero")]
    ZeroMinQueryLen,
    #[error("{section}.base_url must start with http:// or https:// (got {url:?})")]
    InvalidBaseUrl { section: &'static str, url: String },
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub rawg: RawgConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Movie catalog (The Movie Database).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TmdbConfig {
    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,
}

/// Game catalog (RAWG).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RawgConfig {
    #[serde(default = "default_rawg_base_url")]
    pub base_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a search is issued
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Minimum trimmed query length that triggers a search
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
    /// Network timeout for a single catalog request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_tmdb_base_url() -> String {
    DEFAULT_TMDB_BASE_URL.to_string()
}

fn default_rawg_base_url() -> String {
    DEFAULT_RAWG_BASE_URL.to_string()
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_min_query_len() -> usize {
    3
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self { base_url: default_tmdb_base_url() }
    }
}

impl Default for RawgConfig {
    fn default() -> Self {
        Self { base_url: default_rawg_base_url() }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_query_len: default_min_query_len(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Loads `path`, or returns defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.debounce_ms == 0 {
            return Err(ConfigError::ZeroDebounce);
        }
        if self.search.min_query_len == 0 {
            return Err(ConfigError::ZeroMinQueryLen);
        }
        for (section, url) in [("tmdb", &self.tmdb.base_url), ("rawg", &self.rawg.base_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidBaseUrl { section, url: url.clone() });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.search.debounce_ms = 250;
        config.rawg.base_url = "http://localhost:8080/api".to_string();

        config.save_to_file(file.path()).unwrap();

        let loaded = Config::load_from_file(file.path()).unwrap();
        assert_eq!(loaded.search.debounce_ms, 250);
        assert_eq!(loaded.search.min_query_len, 3);
        assert_eq!(loaded.rawg.base_url, "http://localhost:8080/api");
        assert_eq!(loaded.tmdb.base_url, DEFAULT_TMDB_BASE_URL);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("[search]\nmin_query_len = 4\n").unwrap();
        assert_eq!(config.search.min_query_len, 4);
        assert_eq!(config.search.debounce_ms, 500);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.search.debounce_ms, 500);
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.search.debounce_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroDebounce));

        config.search.debounce_ms = 500;
        config.tmdb.base_url = "ftp://example.com".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBaseUrl { section: "tmdb", .. })
        ));
    }
}
