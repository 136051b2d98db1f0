//! Interactive terminal front end.
//!
//! Rendering and input are driven by a single loop that also forwards due
//! searches to the [`SearchDispatcher`] and applies their outcomes. The loop
//! reads input through [`EventSource`] and draws only when given a terminal,
//! so it runs headless under test.

mod input;
mod palette;
mod state;
mod ui;

use color_eyre::Result;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use media_track_core::{AppController, KeyValueStore, SearchCommand, SearchDispatcher, SearchOutcome};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{error, info};

use crate::commands::AppContext;
use state::ViewState;

const TICK: Duration = Duration::from_millis(100);

pub trait EventSource {
    fn poll(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn poll(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }
}

/// Raw mode and the alternate screen for as long as it lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

pub async fn run(context: &AppContext) -> Result<()> {
    let mut controller = context.open_controller()?;
    let (mut dispatcher, mut outcomes) = SearchDispatcher::new(Arc::new(context.catalog()));

    let guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    info!(mode = %controller.view_mode(), "Starting interactive session");

    let result = run_loop(
        &mut controller,
        &mut dispatcher,
        &mut outcomes,
        &mut CrosstermEvents,
        Some(&mut terminal),
    )
    .await;

    drop(guard);
    info!("Interactive session ended");
    result
}

pub async fn run_loop<S: KeyValueStore, B: Backend>(
    controller: &mut AppController<S>,
    dispatcher: &mut SearchDispatcher,
    outcomes: &mut UnboundedReceiver<SearchOutcome>,
    events: &mut dyn EventSource,
    mut terminal: Option<&mut Terminal<B>>,
) -> Result<()> {
    let mut view = ViewState::default();

    while !view.should_quit {
        view.clamp(controller.active_collection().len(), controller.results().len());

        if let Some(term) = terminal.as_mut() {
            let snapshot: &AppController<S> = controller;
            term.draw(|frame| ui::draw(frame, snapshot, &view))?;
        }

        let timeout = controller
            .time_until_search(Instant::now())
            .map_or(TICK, |due| due.min(TICK));

        if let Some(Event::Key(key)) = events.poll(timeout)? {
            match input::handle_key(controller, &mut view, key, Instant::now()) {
                Ok(Some(SearchCommand::Cancelled)) => dispatcher.cancel(),
                Ok(_) => {}
                Err(e) => {
                    error!(error = %e, "Failed to save library");
                    view.status = Some(format!("Could not save: {}", e));
                }
            }
        }

        if let Some(request) = controller.poll_due(Instant::now()) {
            dispatcher.dispatch(request);
        }
        while let Ok(outcome) = outcomes.try_recv() {
            controller.apply_search_outcome(outcome);
        }

        // Let in-flight searches make progress on a single-threaded runtime
        tokio::task::yield_now().await;
    }

    dispatcher.cancel();
    Ok(())
}
