//! Application state: both collections, view mode, theme, search and the add form.
//!
//! The controller is a plain owned value. Time is passed in by the caller so
//! the debounce and item timestamps are deterministic under test.

use chrono::{DateTime, Utc};
use media_track_config::{detect_system_theme, Config};
use media_track_models::{Collection, ItemId, SearchResult, Theme, TrackedItem, ViewMode};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::debounce::Debouncer;
use crate::error::StoreError;
use crate::form::{AddForm, FormField};
use crate::persistence::Storage;
use crate::store::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    pub debounce: Duration,
    pub min_query_len: usize,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            min_query_len: 3,
        }
    }
}

impl ControllerSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            debounce: Duration::from_millis(config.search.debounce_ms),
            min_query_len: config.search.min_query_len,
        }
    }
}

/// Coarse interaction state, derived from the controller's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Searching,
    ModalOpen,
}

/// A search that is due to run against the catalog for `mode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub seq: u64,
    pub query: String,
    pub mode: ViewMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub seq: u64,
    pub results: Vec<SearchResult>,
}

/// What the caller must do with in-flight searches after a query change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchCommand {
    /// A search is pending; dispatch it once `poll_due` yields it.
    Scheduled(u64),
    /// Nothing is pending; any in-flight search is stale.
    Cancelled,
}

pub struct AppController<S> {
    storage: Storage<S>,
    settings: ControllerSettings,
    movies: Collection,
    games: Collection,
    view_mode: ViewMode,
    theme: Theme,
    menu_open: bool,
    modal_open: bool,
    query: String,
    results: Vec<SearchResult>,
    searching: bool,
    debouncer: Debouncer,
    form: AddForm,
}

impl<S: KeyValueStore> AppController<S> {
    /// Loads both collections and the theme, defaulting the theme to the
    /// system preference when none was saved.
    pub fn load(storage: Storage<S>, settings: ControllerSettings) -> Result<Self, StoreError> {
        Self::load_with_default_theme(storage, settings, detect_system_theme)
    }

    pub fn load_with_default_theme(
        mut storage: Storage<S>,
        settings: ControllerSettings,
        default_theme: impl FnOnce() -> Theme,
    ) -> Result<Self, StoreError> {
        let movies = storage.load_collection(ViewMode::Movies)?;
        let games = storage.load_collection(ViewMode::Games)?;
        let theme = match storage.load_theme()? {
            Some(theme) => theme,
            None => default_theme(),
        };
        info!(movies = movies.len(), games = games.len(), ?theme, "Loaded library");

        Ok(Self {
            storage,
            settings,
            movies,
            games,
            view_mode: ViewMode::default(),
            theme,
            menu_open: false,
            modal_open: false,
            query: String::new(),
            results: Vec::new(),
            searching: false,
            debouncer: Debouncer::new(settings.debounce),
            form: AddForm::default(),
        })
    }

    pub fn storage(&self) -> &Storage<S> {
        &self.storage
    }

    pub fn into_storage(self) -> Storage<S> {
        self.storage
    }

    pub fn settings(&self) -> ControllerSettings {
        self.settings
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn collection(&self, mode: ViewMode) -> &Collection {
        match mode {
            ViewMode::Movies => &self.movies,
            ViewMode::Games => &self.games,
        }
    }

    pub fn active_collection(&self) -> &Collection {
        self.collection(self.view_mode)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn is_search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn time_until_search(&self, now: Instant) -> Option<Duration> {
        self.debouncer.time_until_due(now)
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn form(&self) -> &AddForm {
        &self.form
    }

    pub fn phase(&self) -> Phase {
        if self.modal_open {
            Phase::ModalOpen
        } else if self.searching {
            Phase::Searching
        } else {
            Phase::Idle
        }
    }

    /// Records a new search input. Results are cleared immediately; a search
    /// is scheduled only when the trimmed query is long enough.
    pub fn set_query(&mut self, text: impl Into<String>, now: Instant) -> SearchCommand {
        self.query = text.into();
        self.results.clear();
        self.searching = false;

        if self.query.trim().chars().count() < self.settings.min_query_len {
            self.debouncer.cancel();
            return SearchCommand::Cancelled;
        }

        let seq = self.debouncer.schedule(now);
        debug!(seq, query = %self.query, "Search scheduled");
        SearchCommand::Scheduled(seq)
    }

    /// Yields the pending search once its debounce window has elapsed.
    pub fn poll_due(&mut self, now: Instant) -> Option<SearchRequest> {
        let seq = self.debouncer.fire(now)?;
        self.searching = true;
        Some(SearchRequest {
            seq,
            query: self.query.trim().to_string(),
            mode: self.view_mode,
        })
    }

    /// Applies results of the latest search; outcomes of superseded searches
    /// are dropped. Returns whether the outcome was applied.
    pub fn apply_search_outcome(&mut self, outcome: SearchOutcome) -> bool {
        if !self.debouncer.is_current(outcome.seq) {
            debug!(seq = outcome.seq, "Discarding stale search outcome");
            return false;
        }
        self.searching = false;
        self.results = outcome.results;
        true
    }

    /// Fills the add form from the result at `index` and opens it.
    pub fn select_result(&mut self, index: usize) -> bool {
        let Some(result) = self.results.get(index).cloned() else {
            return false;
        };
        self.form.populate_from(&result, self.view_mode);
        self.query.clear();
        self.results.clear();
        self.searching = false;
        self.debouncer.cancel();
        self.modal_open = true;
        true
    }

    pub fn open_modal(&mut self) {
        self.menu_open = false;
        self.modal_open = true;
    }

    /// Resets every form field without touching the modal.
    pub fn clear_form(&mut self) {
        self.form.clear();
    }

    pub fn close_modal(&mut self) {
        self.modal_open = false;
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value.into());
    }

    /// Prepends the form's item to the active collection and persists it.
    ///
    /// A blank title is a silent no-op that returns `Ok(None)`. When the write
    /// fails the collection and the open form are left as they were.
    pub fn submit_form(&mut self, now: DateTime<Utc>) -> Result<Option<ItemId>, StoreError> {
        let mode = self.view_mode;
        let id = self.collection(mode).next_id(now);
        let Some(item) = self.form.build_item(mode, id.clone(), now) else {
            debug!("Ignoring submit with empty title");
            return Ok(None);
        };

        info!(%id, title = %item.title, mode = %mode, "Adding item");
        let mut updated = self.collection(mode).clone();
        updated.prepend(item);
        self.commit_collection(mode, updated)?;

        self.form.clear();
        self.modal_open = false;
        Ok(Some(id))
    }

    /// Removes `id` from the active collection and persists the change.
    pub fn remove_item(&mut self, id: &ItemId) -> Result<Option<TrackedItem>, StoreError> {
        let mode = self.view_mode;
        let mut updated = self.collection(mode).clone();
        let Some(removed) = updated.remove(id) else {
            return Ok(None);
        };
        self.commit_collection(mode, updated)?;
        info!(%id, title = %removed.title, mode = %mode, "Removed item");
        Ok(Some(removed))
    }

    /// Empties the collection for `mode` and persists it.
    pub fn clear_collection(&mut self, mode: ViewMode) -> Result<usize, StoreError> {
        let removed = self.collection(mode).len();
        self.commit_collection(mode, Collection::new())?;
        Ok(removed)
    }

    /// Switches collection and catalog. The form and modal are kept; an
    /// active query is re-run against the new catalog.
    pub fn toggle_view_mode(&mut self, now: Instant) -> SearchCommand {
        self.set_view_mode(self.view_mode.toggle(), now)
    }

    pub fn set_view_mode(&mut self, mode: ViewMode, now: Instant) -> SearchCommand {
        self.view_mode = mode;
        let query = std::mem::take(&mut self.query);
        self.set_query(query, now)
    }

    pub fn toggle_theme(&mut self) -> Result<Theme, StoreError> {
        self.set_theme(self.theme.toggle())?;
        Ok(self.theme)
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), StoreError> {
        self.storage.save_theme(theme)?;
        self.theme = theme;
        Ok(())
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Persists `updated` and only then replaces the in-memory collection.
    fn commit_collection(&mut self, mode: ViewMode, updated: Collection) -> Result<(), StoreError> {
        self.storage.save_collection(mode, &updated)?;
        match mode {
            ViewMode::Movies => self.movies = updated,
            ViewMode::Games => self.games = updated,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
