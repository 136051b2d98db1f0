use chrono::Utc;
use color_eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use media_track_core::{SearchCommand, SearchOutcome};
use media_track_models::{SearchResult, ViewMode};
use std::io::IsTerminal;
use std::time::{Duration, Instant};

use super::AppContext;
use crate::output::Output;

/// One-shot search; with `add`, the chosen result (1-based) goes straight
/// into the collection.
pub async fn run_search(
    context: &AppContext,
    mode: ViewMode,
    query: &str,
    add: Option<usize>,
    output: &Output,
) -> Result<()> {
    let mut controller = context.open_controller()?;
    controller.set_view_mode(mode, Instant::now());

    let now = Instant::now();
    let seq = match controller.set_query(query, now) {
        SearchCommand::Scheduled(seq) => seq,
        SearchCommand::Cancelled => {
            output.warn(format!(
                "Search needs at least {} characters",
                controller.settings().min_query_len
            ));
            return Ok(());
        }
    };

    // No one is typing here, so skip the debounce window
    let Some(request) = controller.poll_due(now + controller.settings().debounce) else {
        return Ok(());
    };

    let registry = context.catalog();
    let spinner = search_spinner(output, &request.query, mode);
    let results = registry.search_or_empty(&request.query, request.mode).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    controller.apply_search_outcome(SearchOutcome { seq, results });

    let Some(n) = add else {
        print_results(controller.results(), mode, output);
        return Ok(());
    };

    if n == 0 || !controller.select_result(n - 1) {
        output.error(format!("No result number {} (got {})", n, controller.results().len()));
        return Ok(());
    }
    let title = controller.form().title.clone();
    if let Some(id) = controller.submit_form(Utc::now())? {
        output.success(format!("Added \"{}\" to {} ({})", title, mode, id));
    }
    Ok(())
}

fn search_spinner(output: &Output, query: &str, mode: ViewMode) -> Option<ProgressBar> {
    if output.is_quiet() || !output.is_human() || !std::io::stderr().is_terminal() {
        return None;
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .map(|s| s.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"))
    {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Searching {} for \"{}\"...", mode, query));
    spinner.enable_steady_tick(Duration::from_millis(80));
    Some(spinner)
}

fn print_results(results: &[SearchResult], mode: ViewMode, output: &Output) {
    if !output.is_human() {
        output.json(&serde_json::json!({
            "mode": mode,
            "count": results.len(),
            "results": results,
        }));
        return;
    }

    if results.is_empty() {
        output.info("No results");
        return;
    }
    for (index, result) in results.iter().enumerate() {
        let subtitle = result.subtitle();
        if subtitle.is_empty() {
            output.info(format!("{:>3}. {}", index + 1, result.title));
        } else {
            output.info(format!("{:>3}. {}  ({})", index + 1, result.title, subtitle));
        }
    }
}
