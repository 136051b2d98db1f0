use super::*;
use crate::persistence::MOVIES_KEY;
use crate::store::MemoryStore;
use media_track_models::{MediaDetails, ResultDetails};

fn controller() -> AppController<MemoryStore> {
    controller_with(MemoryStore::new())
}

fn controller_with(store: MemoryStore) -> AppController<MemoryStore> {
    AppController::load_with_default_theme(
        Storage::new(store),
        ControllerSettings::default(),
        || Theme::Light,
    )
    .unwrap()
}

fn add(controller: &mut AppController<MemoryStore>, title: &str) -> ItemId {
    controller.open_modal();
    controller.set_field(FormField::Title, title);
    controller.submit_form(Utc::now()).unwrap().unwrap()
}

fn movie_result(title: &str) -> SearchResult {
    SearchResult {
        external_id: "1".to_string(),
        title: title.to_string(),
        release_date: "2021".to_string(),
        details: ResultDetails::Movie {
            director: String::new(),
            genre: "Science Fiction".to_string(),
        },
    }
}

#[test]
fn test_add_prepends_to_active_collection() {
    let mut controller = controller();
    add(&mut controller, "Alien");
    let before = controller.active_collection().len();

    add(&mut controller, "Dune");

    let movies = controller.active_collection();
    assert_eq!(movies.len(), before + 1);
    assert_eq!(movies.items()[0].title, "Dune");
    assert_eq!(movies.items()[0].release_date, None);
    assert_eq!(
        movies.items()[0].details,
        MediaDetails::Movie { director: None, genre: None }
    );
    assert!(!controller.is_modal_open());
    assert_eq!(controller.form(), &AddForm::default());
}

#[test]
fn test_blank_title_is_noop() {
    let mut controller = controller();
    add(&mut controller, "Alien");
    controller.open_modal();
    controller.set_field(FormField::Title, "   ");
    controller.set_field(FormField::Genre, "Horror");

    assert_eq!(controller.submit_form(Utc::now()).unwrap(), None);
    assert_eq!(controller.active_collection().len(), 1);
    // Form and modal stay as they were
    assert!(controller.is_modal_open());
    assert_eq!(controller.form().genre, "Horror");
}

#[test]
fn test_remove_keeps_order() {
    let mut controller = controller();
    add(&mut controller, "A");
    let b = add(&mut controller, "B");
    add(&mut controller, "C");

    let removed = controller.remove_item(&b).unwrap();
    assert_eq!(removed.map(|item| item.title), Some("B".to_string()));

    let titles: Vec<_> = controller.active_collection().iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["C", "A"]);
    assert!(controller.remove_item(&b).unwrap().is_none());
}

#[test]
fn test_ids_are_unique_within_collection() {
    let mut controller = controller();
    let now = Utc::now();
    controller.set_field(FormField::Title, "One");
    let first = controller.submit_form(now).unwrap().unwrap();
    controller.set_field(FormField::Title, "Two");
    let second = controller.submit_form(now).unwrap().unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_view_mode_switch_leaves_other_collection_alone() {
    let mut controller = controller();
    add(&mut controller, "Heat");
    let movies_before = controller.collection(ViewMode::Movies).clone();

    controller.toggle_view_mode(Instant::now());
    assert_eq!(controller.view_mode(), ViewMode::Games);
    add(&mut controller, "Tetris");
    let tetris = controller.active_collection().items()[0].id.clone();
    controller.remove_item(&tetris).unwrap();

    assert_eq!(controller.collection(ViewMode::Movies), &movies_before);
    assert!(controller.collection(ViewMode::Games).is_empty());
}

#[test]
fn test_game_items_get_game_details() {
    let mut controller = controller();
    controller.set_view_mode(ViewMode::Games, Instant::now());
    controller.set_field(FormField::Title, "Hades");
    controller.set_field(FormField::Platform, "Switch");
    controller.set_field(FormField::Director, "not a game field");
    controller.submit_form(Utc::now()).unwrap();

    assert_eq!(
        controller.active_collection().items()[0].details,
        MediaDetails::Game { developer: None, platform: Some("Switch".to_string()) }
    );
}

#[test]
fn test_short_query_never_schedules_and_clears_results() {
    let mut controller = controller();
    let start = Instant::now();
    let seq = match controller.set_query("dune", start) {
        SearchCommand::Scheduled(seq) => seq,
        other => panic!("expected a scheduled search, got {:?}", other),
    };
    let request = controller.poll_due(start + Duration::from_millis(500)).unwrap();
    controller.apply_search_outcome(SearchOutcome { seq, results: vec![movie_result("Dune")] });
    assert_eq!(request.query, "dune");
    assert_eq!(controller.results().len(), 1);

    assert_eq!(controller.set_query("  du  ", start), SearchCommand::Cancelled);
    assert!(controller.results().is_empty());
    assert!(!controller.is_search_pending());
    assert_eq!(controller.poll_due(start + Duration::from_secs(10)), None);
}

#[test]
fn test_search_waits_for_debounce() {
    let mut controller = controller();
    let start = Instant::now();
    controller.set_query("dun", start);
    controller.set_query("dune", start + Duration::from_millis(200));

    assert_eq!(controller.poll_due(start + Duration::from_millis(600)), None);
    assert_eq!(controller.phase(), Phase::Idle);

    let request = controller.poll_due(start + Duration::from_millis(700)).unwrap();
    assert_eq!(request.query, "dune");
    assert_eq!(request.mode, ViewMode::Movies);
    assert_eq!(controller.phase(), Phase::Searching);
    assert_eq!(controller.poll_due(start + Duration::from_millis(800)), None);
}

#[test]
fn test_stale_outcome_is_discarded() {
    let mut controller = controller();
    let start = Instant::now();
    controller.set_query("alien", start);
    let old = controller.poll_due(start + Duration::from_millis(500)).unwrap();

    controller.set_query("aliens", start + Duration::from_millis(600));
    let new = controller.poll_due(start + Duration::from_millis(1100)).unwrap();

    assert!(!controller.apply_search_outcome(SearchOutcome {
        seq: old.seq,
        results: vec![movie_result("Alien")],
    }));
    assert!(controller.results().is_empty());
    assert!(controller.is_searching());

    assert!(controller.apply_search_outcome(SearchOutcome {
        seq: new.seq,
        results: vec![movie_result("Aliens")],
    }));
    assert_eq!(controller.results()[0].title, "Aliens");
    assert!(!controller.is_searching());
}

#[test]
fn test_select_result_fills_form_and_opens_modal() {
    let mut controller = controller();
    let start = Instant::now();
    controller.set_query("dune", start);
    let request = controller.poll_due(start + Duration::from_millis(500)).unwrap();
    controller.apply_search_outcome(SearchOutcome {
        seq: request.seq,
        results: vec![movie_result("Dune")],
    });

    assert!(controller.select_result(0));
    assert_eq!(controller.phase(), Phase::ModalOpen);
    assert_eq!(controller.query(), "");
    assert!(controller.results().is_empty());

    let form = controller.form();
    assert_eq!(form.title, "Dune");
    assert_eq!(form.release_date, "2021");
    assert_eq!(form.genre, "Science Fiction");
    assert_eq!(form.developer, "");
    assert_eq!(form.platform, "");

    assert!(!controller.select_result(5));
}

#[test]
fn test_toggle_mode_reschedules_active_query() {
    let mut controller = controller();
    let start = Instant::now();
    controller.set_query("zelda", start);
    controller.open_modal();

    let command = controller.toggle_view_mode(start + Duration::from_millis(100));
    assert!(matches!(command, SearchCommand::Scheduled(_)));
    assert!(controller.is_modal_open());
    assert_eq!(controller.query(), "zelda");

    let request = controller.poll_due(start + Duration::from_millis(600)).unwrap();
    assert_eq!(request.mode, ViewMode::Games);
}

#[test]
fn test_theme_toggle_survives_reload() {
    let mut controller = controller();
    assert_eq!(controller.theme(), Theme::Light);
    assert_eq!(controller.toggle_theme().unwrap(), Theme::Dark);

    let store = controller.storage().store().clone();
    let reloaded = controller_with(store);
    assert_eq!(reloaded.theme(), Theme::Dark);
}

#[test]
fn test_collections_survive_reload() {
    let mut controller = controller();
    add(&mut controller, "Heat");
    controller.toggle_view_mode(Instant::now());
    add(&mut controller, "Doom");

    let reloaded = controller_with(controller.storage().store().clone());
    assert_eq!(reloaded.collection(ViewMode::Movies).items()[0].title, "Heat");
    assert_eq!(reloaded.collection(ViewMode::Games).items()[0].title, "Doom");
    assert_eq!(reloaded.view_mode(), ViewMode::Movies);
}

#[test]
fn test_clear_collection() {
    let mut controller = controller();
    add(&mut controller, "Heat");
    add(&mut controller, "Ronin");
    assert_eq!(controller.clear_collection(ViewMode::Movies).unwrap(), 2);
    assert!(controller.active_collection().is_empty());
}

#[test]
fn test_close_modal_keeps_draft_until_cleared() {
    let mut controller = controller();
    controller.open_modal();
    controller.set_field(FormField::Title, "Draft");
    controller.close_modal();
    assert_eq!(controller.form().title, "Draft");

    controller.clear_form();
    controller.open_modal();
    assert_eq!(controller.form(), &AddForm::default());
}

/// Serves reads from an inner store; writes fail once `read_only` is set.
struct ReadOnlyStore {
    inner: MemoryStore,
    read_only: std::rc::Rc<std::cell::Cell<bool>>,
}

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.read_only.get() {
            let error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
            return Err(StoreError::io(format!("{}.json", key), error));
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.inner.remove(key)
    }
}

fn read_only_controller() -> (AppController<ReadOnlyStore>, std::rc::Rc<std::cell::Cell<bool>>) {
    let read_only = std::rc::Rc::new(std::cell::Cell::new(false));
    let store = ReadOnlyStore {
        inner: MemoryStore::new(),
        read_only: read_only.clone(),
    };
    let controller = AppController::load_with_default_theme(
        Storage::new(store),
        ControllerSettings::default(),
        || Theme::Light,
    )
    .unwrap();
    (controller, read_only)
}

#[test]
fn test_failed_submit_leaves_collection_and_form_untouched() {
    let (mut controller, read_only) = read_only_controller();
    read_only.set(true);
    controller.open_modal();
    controller.set_field(FormField::Title, "Dune");

    assert!(controller.submit_form(Utc::now()).is_err());
    assert!(controller.submit_form(Utc::now()).is_err());

    assert!(controller.active_collection().is_empty());
    assert!(controller.is_modal_open());
    assert_eq!(controller.form().title, "Dune");

    // Once writes succeed again the retry adds exactly one item
    read_only.set(false);
    assert!(controller.submit_form(Utc::now()).unwrap().is_some());
    assert_eq!(controller.active_collection().len(), 1);
    assert!(controller.storage().store().inner.raw(MOVIES_KEY).is_some());
}

#[test]
fn test_failed_remove_keeps_item() {
    let (mut controller, read_only) = read_only_controller();
    controller.open_modal();
    controller.set_field(FormField::Title, "Heat");
    let id = controller.submit_form(Utc::now()).unwrap().unwrap();

    read_only.set(true);
    assert!(controller.remove_item(&id).is_err());
    assert!(controller.clear_collection(ViewMode::Movies).is_err());

    assert!(controller.active_collection().contains(&id));
    assert_eq!(controller.active_collection().len(), 1);
}

#[test]
fn test_failed_theme_save_keeps_theme() {
    let (mut controller, read_only) = read_only_controller();
    read_only.set(true);

    assert!(controller.toggle_theme().is_err());
    assert_eq!(controller.theme(), Theme::Light);
}
