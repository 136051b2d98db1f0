use media_track_core::{AppController, FormField, KeyValueStore};
use media_track_models::{TrackedItem, ViewMode};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use super::input::menu_label;
use super::palette::Palette;
use super::state::{Focus, MenuEntry, ViewState};

const MAX_VISIBLE_RESULTS: usize = 6;
const MENU_WIDTH: u16 = 30;

pub fn draw<S: KeyValueStore>(frame: &mut Frame, controller: &AppController<S>, view: &ViewState) {
    let palette = Palette::for_theme(controller.theme());
    let area = frame.area();
    frame.render_widget(Block::default().style(palette.base()), area);

    let dropdown_height = if controller.is_searching() {
        3
    } else if controller.results().is_empty() {
        0
    } else {
        (controller.results().len().min(MAX_VISIBLE_RESULTS) * 2 + 2) as u16
    };

    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(dropdown_height),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .split(area);

    draw_header(frame, chunks[0], controller, &palette);
    draw_collection(frame, chunks[1], controller, view, &palette);
    draw_dropdown(frame, chunks[2], controller, view, &palette);
    draw_search_bar(frame, chunks[3], controller, view, &palette);
    draw_footer(frame, chunks[4], view, &palette);

    if controller.is_menu_open() {
        draw_menu(frame, area, controller, view, &palette);
    }
    if controller.is_modal_open() {
        draw_modal(frame, area, controller, view, &palette);
    }
}

fn draw_header<S: KeyValueStore>(frame: &mut Frame, area: Rect, controller: &AppController<S>, palette: &Palette) {
    let mode_span = |mode: ViewMode| {
        if mode == controller.view_mode() {
            Span::styled(format!(" {} ", mode.label()), palette.highlight())
        } else {
            Span::styled(format!(" {} ", mode.label()), palette.muted())
        }
    };

    let line = Line::from(vec![
        Span::styled("i am watching", palette.title()),
        Span::raw("   "),
        mode_span(ViewMode::Movies),
        Span::styled("|", palette.muted()),
        mode_span(ViewMode::Games),
        Span::styled("   Ctrl-T switch · Ctrl-N add · F2 menu", palette.muted()),
    ]);

    let header = Paragraph::new(line).style(palette.base()).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(palette.border(false)),
    );
    frame.render_widget(header, area);
}

fn item_metadata(item: &TrackedItem) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(date) = item.release_date.as_deref().filter(|d| !d.is_empty()) {
        parts.push(date.to_string());
    }
    for (label, value) in item.details.labelled_fields() {
        parts.push(format!("{}: {}", label, value));
    }
    parts.join(" • ")
}

fn draw_collection<S: KeyValueStore>(
    frame: &mut Frame,
    area: Rect,
    controller: &AppController<S>,
    view: &ViewState,
    palette: &Palette,
) {
    let mode = controller.view_mode();
    let collection = controller.active_collection();
    let focused = view.focus == Focus::List;
    let block = Block::bordered()
        .title(format!(" My {} ({}) ", mode.label(), collection.len()))
        .border_style(palette.border(focused))
        .style(palette.base());

    if collection.is_empty() {
        let empty = Paragraph::new(format!("No {} added yet", mode.noun()))
            .style(palette.muted())
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = collection
        .iter()
        .map(|item| {
            let mut lines = vec![Line::from(Span::styled(
                item.title.clone(),
                palette.base().add_modifier(Modifier::BOLD),
            ))];
            let metadata = item_metadata(item);
            if !metadata.is_empty() {
                lines.push(Line::from(Span::styled(metadata, palette.muted())));
            }
            ListItem::new(Text::from(lines))
        })
        .collect();

    let mut list = List::new(items).block(block).style(palette.base());
    if focused {
        list = list.highlight_style(palette.highlight()).highlight_symbol("> ");
    }
    let mut state = ListState::default().with_selected(Some(view.list_cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_dropdown<S: KeyValueStore>(
    frame: &mut Frame,
    area: Rect,
    controller: &AppController<S>,
    view: &ViewState,
    palette: &Palette,
) {
    if area.height == 0 {
        return;
    }
    let block = Block::bordered()
        .border_style(palette.border(view.focus == Focus::Results))
        .style(palette.base());

    if controller.is_searching() {
        let searching = Paragraph::new("Searching...").style(palette.muted()).block(block);
        frame.render_widget(searching, area);
        return;
    }

    let items: Vec<ListItem> = controller
        .results()
        .iter()
        .map(|result| {
            ListItem::new(Text::from(vec![
                Line::from(Span::styled(result.title.clone(), palette.base())),
                Line::from(Span::styled(result.subtitle(), palette.muted())),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .style(palette.base())
        .highlight_style(palette.highlight());
    let selected = (view.focus == Focus::Results).then_some(view.result_cursor);
    let mut state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_search_bar<S: KeyValueStore>(
    frame: &mut Frame,
    area: Rect,
    controller: &AppController<S>,
    view: &ViewState,
    palette: &Palette,
) {
    let focused = view.focus == Focus::Search;
    let block = Block::bordered()
        .title(" Search ")
        .border_style(palette.border(focused))
        .style(palette.base());

    let query = controller.query();
    let content = if query.is_empty() {
        Paragraph::new(format!("Search for {}...", controller.view_mode().noun())).style(palette.muted())
    } else {
        Paragraph::new(query.to_string()).style(palette.base())
    };
    frame.render_widget(content.block(block), area);

    if focused && !controller.is_modal_open() && !controller.is_menu_open() {
        let offset = query.chars().count() as u16;
        let x = (area.x + 1 + offset).min(area.right().saturating_sub(2));
        frame.set_cursor_position((x, area.y + 1));
    }
}

fn draw_footer(frame: &mut Frame, area: Rect, view: &ViewState, palette: &Palette) {
    let text = match &view.status {
        Some(status) => Line::from(Span::styled(status.clone(), palette.base())),
        None => Line::from(Span::styled(
            "Tab focus list · Del/x remove · Enter pick result · Esc quit",
            palette.muted(),
        )),
    };
    frame.render_widget(Paragraph::new(text).style(palette.base()), area);
}

fn draw_menu<S: KeyValueStore>(
    frame: &mut Frame,
    area: Rect,
    controller: &AppController<S>,
    view: &ViewState,
    palette: &Palette,
) {
    let width = MENU_WIDTH.min(area.width);
    let menu_area = Rect {
        x: area.right() - width,
        y: area.y,
        width,
        height: area.height,
    };
    frame.render_widget(Clear, menu_area);

    let items: Vec<ListItem> = MenuEntry::ALL
        .iter()
        .map(|entry| {
            let label = match entry {
                MenuEntry::Theme if controller.theme().is_dark() => "Light Mode",
                MenuEntry::Theme => "Dark Mode",
                other => menu_label(*other),
            };
            ListItem::new(Line::from(label))
        })
        .collect();

    let block = Block::bordered()
        .title(" Menu ")
        .title_bottom(Line::from(format!(" iamwatching {} ", env!("CARGO_PKG_VERSION"))).style(palette.muted()))
        .border_style(palette.border(true))
        .style(palette.base());

    let list = List::new(items)
        .block(block)
        .style(palette.base())
        .highlight_style(palette.highlight())
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(view.menu_cursor));
    frame.render_stateful_widget(list, menu_area, &mut state);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_modal<S: KeyValueStore>(
    frame: &mut Frame,
    area: Rect,
    controller: &AppController<S>,
    view: &ViewState,
    palette: &Palette,
) {
    let mode = controller.view_mode();
    let fields = FormField::for_mode(mode);
    let height = fields.len() as u16 * 3 + 2;
    let modal_area = centered_rect(area.width.saturating_mul(3) / 5, height, area);
    frame.render_widget(Clear, modal_area);

    let block = Block::bordered()
        .title(format!(" Add {} ", mode.item_label()))
        .title_bottom(Line::from(" Enter save · Tab next field · Esc cancel ").style(palette.muted()))
        .border_style(palette.border(true))
        .style(palette.base());
    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let rows = Layout::vertical(fields.iter().map(|_| Constraint::Length(3))).split(inner);
    let current = view.current_field(mode);
    for (field, row) in fields.iter().zip(rows.iter()) {
        let focused = *field == current;
        let input = Paragraph::new(controller.form().get(*field).to_string())
            .style(palette.base())
            .block(
                Block::bordered()
                    .title(field.label())
                    .border_style(palette.border(focused)),
            );
        frame.render_widget(input, *row);

        if focused {
            let offset = controller.form().get(*field).chars().count() as u16;
            let x = (row.x + 1 + offset).min(row.right().saturating_sub(2));
            frame.set_cursor_position((x, row.y + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use media_track_core::{ControllerSettings, MemoryStore, Storage};
    use media_track_models::Theme;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::time::Instant;

    fn controller() -> AppController<MemoryStore> {
        AppController::load_with_default_theme(
            Storage::new(MemoryStore::new()),
            ControllerSettings::default(),
            || Theme::Dark,
        )
        .unwrap()
    }

    fn render(controller: &AppController<MemoryStore>, view: &ViewState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, controller, view)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_empty_collection_messages() {
        let mut controller = controller();
        let view = ViewState::default();

        let screen = render(&controller, &view);
        assert!(screen.contains("No movies or shows added yet"));
        assert!(screen.contains("Search for movies or shows..."));

        controller.toggle_view_mode(Instant::now());
        let screen = render(&controller, &view);
        assert!(screen.contains("No games added yet"));
        assert!(screen.contains("Search for games..."));
    }

    #[test]
    fn test_modal_shows_mode_fields() {
        let mut controller = controller();
        controller.toggle_view_mode(Instant::now());
        controller.open_modal();

        let screen = render(&controller, &ViewState::default());
        assert!(screen.contains("Add Game"));
        assert!(screen.contains("Developer"));
        assert!(screen.contains("Platform"));
        assert!(!screen.contains("Director"));
    }

    #[test]
    fn test_menu_offers_opposite_theme() {
        let mut controller = controller();
        controller.toggle_menu();

        let screen = render(&controller, &ViewState::default());
        assert!(screen.contains("Subscriptions"));
        assert!(screen.contains("Light Mode"));
    }

    #[test]
    fn test_searching_indicator() {
        let mut controller = controller();
        let start = Instant::now();
        controller.set_query("dune", start);
        controller.poll_due(start + ControllerSettings::default().debounce);

        let screen = render(&controller, &ViewState::default());
        assert!(screen.contains("Searching..."));
    }
}
