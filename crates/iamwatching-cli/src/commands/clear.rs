use color_eyre::Result;
use media_track_core::THEME_KEY;
use media_track_models::ViewMode;

use super::prompts::prompt_yes_no;
use super::AppContext;
use crate::output::Output;

pub struct ClearTargets {
    pub all: bool,
    pub movies: bool,
    pub games: bool,
    pub theme: bool,
}

pub fn run_clear(context: &AppContext, targets: ClearTargets, yes: bool, output: &Output) -> Result<()> {
    let movies = targets.all || targets.movies;
    let games = targets.all || targets.games;
    let theme = targets.all || targets.theme;

    if !(movies || games || theme) {
        output.warn("No clear option specified. Use --movies, --games, --theme, or --all");
        output.info("\nExample: iamwatching clear --games");
        return Ok(());
    }

    if !yes && !prompt_yes_no("This permanently deletes the selected data. Continue?", false)? {
        output.info("Nothing was cleared");
        return Ok(());
    }

    let mut controller = context.open_controller()?;
    for (selected, mode) in [(movies, ViewMode::Movies), (games, ViewMode::Games)] {
        if !selected {
            continue;
        }
        let removed = controller.clear_collection(mode)?;
        output.success(format!("Cleared {} {}", removed, mode));
    }

    if theme {
        let mut storage = controller.into_storage();
        storage.clear(THEME_KEY)?;
        output.success("Cleared saved theme");
    }
    Ok(())
}
