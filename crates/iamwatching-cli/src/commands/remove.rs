use color_eyre::Result;
use media_track_models::{ItemId, ViewMode};
use std::time::Instant;

use super::AppContext;
use crate::output::Output;

pub fn run_remove(context: &AppContext, mode: ViewMode, id: &str, output: &Output) -> Result<()> {
    let mut controller = context.open_controller()?;
    controller.set_view_mode(mode, Instant::now());

    match controller.remove_item(&ItemId::from(id))? {
        Some(item) => output.success(format!("Removed \"{}\" from {}", item.title, mode)),
        None => output.warn(format!("No item with id {} in {}", id, mode)),
    }
    Ok(())
}
