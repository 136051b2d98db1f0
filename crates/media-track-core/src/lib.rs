pub mod controller;
pub mod debounce;
pub mod dispatcher;
pub mod error;
pub mod form;
pub mod persistence;
pub mod store;

pub use controller::{AppController, ControllerSettings, Phase, SearchCommand, SearchOutcome, SearchRequest};
pub use debounce::Debouncer;
pub use dispatcher::SearchDispatcher;
pub use error::StoreError;
pub use form::{AddForm, FormField};
pub use persistence::{collection_key, Storage, GAMES_KEY, MOVIES_KEY, SCHEMA_VERSION, THEME_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore};
