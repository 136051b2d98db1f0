use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

const TMDB_API_KEY: &str = "tmdb_api_key";
const RAWG_API_KEY: &str = "rawg_api_key";

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn get_tmdb_api_key(&self) -> Option<&String> {
        self.get(TMDB_API_KEY)
    }

    pub fn set_tmdb_api_key(&mut self, key: String) {
        self.set(TMDB_API_KEY.to_string(), key);
    }

    pub fn get_rawg_api_key(&self) -> Option<&String> {
        self.get(RAWG_API_KEY)
    }

    pub fn set_rawg_api_key(&mut self, key: String) {
        self.set(RAWG_API_KEY.to_string(), key);
    }
}

/// Catalog API keys after applying environment overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiKeys {
    pub tmdb: Option<String>,
    pub rawg: Option<String>,
}

impl ApiKeys {
    /// `TMDB_API_KEY` / `RAWG_API_KEY` win over the credentials file.
    pub fn resolve(store: &CredentialStore) -> Self {
        Self::resolve_with(store, |name| std::env::var(name).ok())
    }

    fn resolve_with(store: &CredentialStore, env: impl Fn(&str) -> Option<String>) -> Self {
        let pick = |var: &str, stored: Option<&String>| {
            env(var)
                .filter(|k| !k.trim().is_empty())
                .or_else(|| stored.cloned())
                .filter(|k| !k.trim().is_empty())
        };
        Self {
            tmdb: pick("TMDB_API_KEY", store.get_tmdb_api_key()),
            rawg: pick("RAWG_API_KEY", store.get_rawg_api_key()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_credential_store_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();

        let mut store = CredentialStore::new(path.clone());
        store.set_tmdb_api_key("tmdb_key".to_string());
        store.set_rawg_api_key("rawg_key".to_string());
        store.save().unwrap();

        let mut loaded_store = CredentialStore::new(path);
        loaded_store.load().unwrap();
        assert_eq!(loaded_store.get_tmdb_api_key(), Some(&"tmdb_key".to_string()));
        assert_eq!(loaded_store.get_rawg_api_key(), Some(&"rawg_key".to_string()));
    }

    #[test]
    fn test_api_keys_env_overrides_store() {
        let mut store = CredentialStore::new(PathBuf::from("/tmp/test"));
        store.set_tmdb_api_key("from_file".to_string());
        store.set_rawg_api_key("   ".to_string());

        let keys = ApiKeys::resolve_with(&store, |name| {
            (name == "TMDB_API_KEY").then(|| "from_env".to_string())
        });
        assert_eq!(keys.tmdb.as_deref(), Some("from_env"));
        assert_eq!(keys.rawg, None);

        let keys = ApiKeys::resolve_with(&store, |_| None);
        assert_eq!(keys.tmdb.as_deref(), Some("from_file"));
    }
}
