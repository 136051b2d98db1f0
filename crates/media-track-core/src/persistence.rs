//! Typed, versioned access to the persisted collections and theme.
//!
//! Every value is stored as an envelope `{"schema_version": N, "data": ...}`.
//! Values without an envelope are schema version 0, the bare JSON written by
//! the original web client, and are migrated on first read.

mod migration;

use media_track_models::{Collection, Theme, ViewMode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::StoreError;
use crate::store::KeyValueStore;

pub const SCHEMA_VERSION: u32 = 1;

pub const MOVIES_KEY: &str = "watchedMedia";
pub const GAMES_KEY: &str = "playedGames";
pub const THEME_KEY: &str = "darkMode";

pub fn collection_key(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Movies => MOVIES_KEY,
        ViewMode::Games => GAMES_KEY,
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    schema_version: u32,
    data: &'a T,
}

#[derive(Deserialize)]
struct Envelope {
    schema_version: u32,
    data: Value,
}

pub struct Storage<S> {
    store: S,
}

impl<S: KeyValueStore> Storage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load_collection(&mut self, mode: ViewMode) -> Result<Collection, StoreError> {
        let key = collection_key(mode);
        let Some((version, data)) = self.read_versioned(key)? else {
            return Ok(Collection::new());
        };

        let decoded = if version == 0 {
            migration::collection_from_v0(data, mode)
        } else {
            serde_json::from_value::<Collection>(data)
        };

        let collection = match decoded {
            Ok(collection) => collection,
            Err(e) => {
                warn!("Stored {} is malformed ({}); starting with an empty collection", key, e);
                self.store.quarantine(key)?;
                return Ok(Collection::new());
            }
        };

        let collection = Self::drop_foreign_items(collection, mode, key);

        if version == 0 {
            info!(
                "Migrated {} from schema version 0 to {} ({} items)",
                key,
                SCHEMA_VERSION,
                collection.len()
            );
            self.save_collection(mode, &collection)?;
        }

        Ok(collection)
    }

    pub fn save_collection(&mut self, mode: ViewMode, collection: &Collection) -> Result<(), StoreError> {
        self.write_versioned(collection_key(mode), collection)
    }

    /// The persisted theme, or `None` when the user never chose one.
    pub fn load_theme(&mut self) -> Result<Option<Theme>, StoreError> {
        let Some((version, data)) = self.read_versioned(THEME_KEY)? else {
            return Ok(None);
        };

        let decoded = if version == 0 {
            migration::theme_from_v0(data)
        } else {
            serde_json::from_value::<Theme>(data)
        };

        match decoded {
            Ok(theme) => {
                if version == 0 {
                    info!("Migrated {} from schema version 0 to {}", THEME_KEY, SCHEMA_VERSION);
                    self.save_theme(theme)?;
                }
                Ok(Some(theme))
            }
            Err(e) => {
                warn!("Stored {} is malformed ({}); falling back to the system theme", THEME_KEY, e);
                self.store.quarantine(THEME_KEY)?;
                Ok(None)
            }
        }
    }

    pub fn save_theme(&mut self, theme: Theme) -> Result<(), StoreError> {
        self.write_versioned(THEME_KEY, &theme)
    }

    pub fn clear(&mut self, key: &str) -> Result<(), StoreError> {
        self.store.remove(key)
    }

    /// Reads `key` as `(schema_version, data)`. Unparsable JSON is quarantined
    /// and reads as absent; a newer schema version is an error.
    fn read_versioned(&mut self, key: &str) -> Result<Option<(u32, Value)>, StoreError> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };

        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!("Stored {} is not valid JSON ({}); ignoring it", key, e);
                self.store.quarantine(key)?;
                return Ok(None);
            }
        };

        let is_envelope = value
            .as_object()
            .map(|obj| obj.contains_key("schema_version") && obj.contains_key("data"))
            .unwrap_or(false);
        if !is_envelope {
            return Ok(Some((0, value)));
        }

        let envelope: Envelope = match serde_json::from_value(value) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!("Stored {} has a malformed envelope ({}); ignoring it", key, e);
                self.store.quarantine(key)?;
                return Ok(None);
            }
        };

        if envelope.schema_version > SCHEMA_VERSION {
            return Err(StoreError::UnsupportedVersion {
                key: key.to_string(),
                found: envelope.schema_version,
                supported: SCHEMA_VERSION,
            });
        }

        Ok(Some((envelope.schema_version, envelope.data)))
    }

    fn write_versioned<T: Serialize>(&mut self, key: &str, data: &T) -> Result<(), StoreError> {
        let envelope = EnvelopeRef { schema_version: SCHEMA_VERSION, data };
        let encoded = serde_json::to_string(&envelope).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.store.set(key, &encoded)
    }

    fn drop_foreign_items(collection: Collection, mode: ViewMode, key: &str) -> Collection {
        let total = collection.len();
        let items: Vec<_> = collection
            .items()
            .iter()
            .filter(|item| item.view_mode() == mode)
            .cloned()
            .collect();
        if items.len() != total {
            warn!("Dropped {} items of the wrong kind from {}", total - items.len(), key);
        }
        Collection::from_items(items)
    }
}
