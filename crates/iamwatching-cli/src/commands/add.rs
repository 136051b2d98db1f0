use chrono::Utc;
use color_eyre::Result;
use media_track_core::FormField;
use media_track_models::ViewMode;
use std::time::Instant;

use super::AppContext;
use crate::output::Output;

pub struct AddFields {
    pub title: String,
    pub release_date: Option<String>,
    pub director: Option<String>,
    pub genre: Option<String>,
    pub developer: Option<String>,
    pub platform: Option<String>,
}

impl AddFields {
    fn entries(&self) -> [(FormField, Option<&str>); 6] {
        [
            (FormField::Title, Some(self.title.as_str())),
            (FormField::ReleaseDate, self.release_date.as_deref()),
            (FormField::Director, self.director.as_deref()),
            (FormField::Genre, self.genre.as_deref()),
            (FormField::Developer, self.developer.as_deref()),
            (FormField::Platform, self.platform.as_deref()),
        ]
    }
}

pub fn run_add(context: &AppContext, mode: ViewMode, fields: AddFields, output: &Output) -> Result<()> {
    let mut controller = context.open_controller()?;
    controller.set_view_mode(mode, Instant::now());
    controller.open_modal();

    let allowed = FormField::for_mode(mode);
    for (field, value) in fields.entries() {
        let Some(value) = value else { continue };
        if !allowed.contains(&field) {
            output.warn(format!("Ignoring {} for {}", field.label(), mode));
            continue;
        }
        controller.set_field(field, value);
    }

    match controller.submit_form(Utc::now())? {
        Some(id) => {
            output.success(format!("Added \"{}\" to {} ({})", fields.title.trim(), mode, id));
        }
        None => output.warn("Title is required; nothing was added"),
    }
    Ok(())
}
