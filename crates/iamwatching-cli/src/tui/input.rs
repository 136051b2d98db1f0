use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use media_track_core::{AppController, KeyValueStore, SearchCommand, StoreError};
use std::time::Instant;
use tracing::debug;

use super::state::{Focus, MenuEntry, ViewState};

type KeyResult = Result<Option<SearchCommand>, StoreError>;

/// Applies one key press. Returns the search command produced by a query or
/// mode change, which the caller forwards to the dispatcher.
pub fn handle_key<S: KeyValueStore>(
    controller: &mut AppController<S>,
    view: &mut ViewState,
    key: KeyEvent,
    now: Instant,
) -> KeyResult {
    if key.kind != KeyEventKind::Press {
        return Ok(None);
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if ctrl => {
            view.should_quit = true;
            return Ok(None);
        }
        KeyCode::Char('t') if ctrl => {
            view.list_cursor = 0;
            view.result_cursor = 0;
            let command = controller.toggle_view_mode(now);
            debug!(mode = %controller.view_mode(), "Switched view mode");
            return Ok(Some(command));
        }
        KeyCode::Char('n') if ctrl => {
            controller.clear_form();
            controller.open_modal();
            view.field_index = 0;
            return Ok(None);
        }
        _ => {}
    }

    if controller.is_modal_open() {
        return handle_modal_key(controller, view, key);
    }

    if key.code == KeyCode::F(2) {
        controller.toggle_menu();
        view.menu_cursor = 0;
        return Ok(None);
    }

    if controller.is_menu_open() {
        return handle_menu_key(controller, view, key);
    }

    match view.focus {
        Focus::Search => handle_search_key(controller, view, key, now),
        Focus::Results => handle_results_key(controller, view, key, now),
        Focus::List => handle_list_key(controller, view, key),
    }
}

fn typed_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c)
            if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(c)
        }
        _ => None,
    }
}

fn handle_modal_key<S: KeyValueStore>(
    controller: &mut AppController<S>,
    view: &mut ViewState,
    key: KeyEvent,
) -> KeyResult {
    let mode = controller.view_mode();
    let field = view.current_field(mode);

    match key.code {
        KeyCode::Esc => controller.close_modal(),
        KeyCode::Tab | KeyCode::Down => view.next_field(mode),
        KeyCode::BackTab | KeyCode::Up => view.previous_field(mode),
        KeyCode::Enter => match controller.submit_form(Utc::now())? {
            Some(_) => {
                let title = controller
                    .active_collection()
                    .items()
                    .first()
                    .map(|item| item.title.clone())
                    .unwrap_or_default();
                view.status = Some(format!("Added \"{}\"", title));
                view.list_cursor = 0;
                view.field_index = 0;
            }
            None => view.status = Some("Title is required".to_string()),
        },
        KeyCode::Backspace => {
            let mut value = controller.form().get(field).to_string();
            value.pop();
            controller.set_field(field, value);
        }
        _ => {
            if let Some(c) = typed_char(&key) {
                let mut value = controller.form().get(field).to_string();
                value.push(c);
                controller.set_field(field, value);
            }
        }
    }
    Ok(None)
}

fn handle_menu_key<S: KeyValueStore>(
    controller: &mut AppController<S>,
    view: &mut ViewState,
    key: KeyEvent,
) -> KeyResult {
    let count = MenuEntry::ALL.len();
    match key.code {
        KeyCode::Esc => controller.close_menu(),
        KeyCode::Up => view.menu_cursor = (view.menu_cursor + count - 1) % count,
        KeyCode::Down => view.menu_cursor = (view.menu_cursor + 1) % count,
        KeyCode::Enter => match view.menu_entry() {
            MenuEntry::Theme => {
                let theme = controller.toggle_theme()?;
                controller.close_menu();
                debug!(?theme, "Toggled theme from menu");
            }
            entry => {
                controller.close_menu();
                view.status = Some(format!("{} is not available yet", menu_label(entry)));
            }
        },
        _ => {}
    }
    Ok(None)
}

pub fn menu_label(entry: MenuEntry) -> &'static str {
    match entry {
        MenuEntry::Settings => "Settings",
        MenuEntry::Profile => "Profile",
        MenuEntry::Subscriptions => "Subscriptions",
        MenuEntry::Theme => "Theme",
    }
}

fn edit_query<S: KeyValueStore>(
    controller: &mut AppController<S>,
    view: &mut ViewState,
    edit: impl FnOnce(&mut String),
    now: Instant,
) -> KeyResult {
    let mut query = controller.query().to_string();
    edit(&mut query);
    view.focus = Focus::Search;
    view.result_cursor = 0;
    Ok(Some(controller.set_query(query, now)))
}

fn handle_search_key<S: KeyValueStore>(
    controller: &mut AppController<S>,
    view: &mut ViewState,
    key: KeyEvent,
    now: Instant,
) -> KeyResult {
    match key.code {
        KeyCode::Backspace => return edit_query(controller, view, |q| { q.pop(); }, now),
        KeyCode::Esc if controller.query().is_empty() => view.should_quit = true,
        KeyCode::Esc => return edit_query(controller, view, String::clear, now),
        KeyCode::Down if !controller.results().is_empty() => view.focus = Focus::Results,
        KeyCode::Down | KeyCode::Tab => view.focus = Focus::List,
        KeyCode::Enter => select_result(controller, view),
        _ => {
            if let Some(c) = typed_char(&key) {
                return edit_query(controller, view, |q| q.push(c), now);
            }
        }
    }
    Ok(None)
}

fn handle_results_key<S: KeyValueStore>(
    controller: &mut AppController<S>,
    view: &mut ViewState,
    key: KeyEvent,
    now: Instant,
) -> KeyResult {
    let last = controller.results().len().saturating_sub(1);
    match key.code {
        KeyCode::Up if view.result_cursor == 0 => view.focus = Focus::Search,
        KeyCode::Up => view.result_cursor -= 1,
        KeyCode::Down => view.result_cursor = (view.result_cursor + 1).min(last),
        KeyCode::Enter => select_result(controller, view),
        KeyCode::Esc | KeyCode::Tab => view.focus = Focus::Search,
        KeyCode::Backspace => return edit_query(controller, view, |q| { q.pop(); }, now),
        _ => {
            if let Some(c) = typed_char(&key) {
                return edit_query(controller, view, |q| q.push(c), now);
            }
        }
    }
    Ok(None)
}

fn handle_list_key<S: KeyValueStore>(
    controller: &mut AppController<S>,
    view: &mut ViewState,
    key: KeyEvent,
) -> KeyResult {
    let last = controller.active_collection().len().saturating_sub(1);
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => view.list_cursor = view.list_cursor.saturating_sub(1),
        KeyCode::Down | KeyCode::Char('j') => view.list_cursor = (view.list_cursor + 1).min(last),
        KeyCode::Delete | KeyCode::Char('x') => {
            let id = controller
                .active_collection()
                .items()
                .get(view.list_cursor)
                .map(|item| item.id.clone());
            if let Some(id) = id {
                if let Some(item) = controller.remove_item(&id)? {
                    view.status = Some(format!("Removed \"{}\"", item.title));
                }
            }
        }
        KeyCode::Char('q') => view.should_quit = true,
        KeyCode::Tab | KeyCode::Esc | KeyCode::Char('/') => view.focus = Focus::Search,
        _ => {}
    }
    Ok(None)
}

fn select_result<S: KeyValueStore>(controller: &mut AppController<S>, view: &mut ViewState) {
    if controller.select_result(view.result_cursor) {
        view.focus = Focus::Search;
        view.result_cursor = 0;
        view.field_index = 0;
    }
}
