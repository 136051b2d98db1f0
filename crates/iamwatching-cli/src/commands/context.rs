use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use media_track_config::{ApiKeys, Config, CredentialStore, LoggingConfig, PathManager};
use media_track_core::{AppController, ControllerSettings, FileStore, Storage};
use media_track_sources::CatalogRegistry;

/// Everything a command needs that comes from disk or the environment.
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
    pub api_keys: ApiKeys,
}

impl AppContext {
    /// The level configured in `config.toml`, read before logging is up.
    /// A missing or unreadable file gives the default level; `load_from`
    /// reports the actual problem once logging is running.
    pub fn startup_log_level(paths: &PathManager) -> String {
        let config_file = paths.config_file();
        if !config_file.exists() {
            return LoggingConfig::default().level;
        }
        Config::load_from_file(&config_file)
            .map(|config| config.logging.level)
            .unwrap_or_else(|_| LoggingConfig::default().level)
    }

    pub fn load_from(paths: PathManager) -> Result<Self> {
        paths
            .ensure_directories()
            .map_err(|e| eyre!("Failed to create application directories: {}", e))?;

        let config_file = paths.config_file();
        let config = Config::load_or_default(&config_file)
            .map_err(|e| eyre!("Failed to load {}: {}", config_file.display(), e))?;
        config
            .validate()
            .wrap_err_with(|| format!("Invalid configuration in {}", config_file.display()))?;

        let mut credentials = CredentialStore::new(paths.credentials_file());
        credentials
            .load()
            .map_err(|e| eyre!("Failed to load credentials: {}", e))?;
        let api_keys = ApiKeys::resolve(&credentials);

        Ok(Self { paths, config, api_keys })
    }

    /// Opens the on-disk library. Fails when stored data was written by a
    /// newer version of the app.
    pub fn open_controller(&self) -> Result<AppController<FileStore>> {
        let store = FileStore::new(self.paths.store_dir())
            .wrap_err("Failed to open the data directory")?;
        let controller = AppController::load(Storage::new(store), ControllerSettings::from_config(&self.config))
            .wrap_err("Failed to load saved library")?;
        Ok(controller)
    }

    pub fn catalog(&self) -> CatalogRegistry {
        CatalogRegistry::from_config(&self.config, &self.api_keys)
    }
}
