use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use media_track_models::{Collection, ViewMode};

use super::AppContext;
use crate::output::Output;

pub fn run_list(context: &AppContext, mode: ViewMode, output: &Output) -> Result<()> {
    let controller = context.open_controller()?;
    let collection = controller.collection(mode);

    if !output.is_human() {
        output.json(&serde_json::json!({
            "mode": mode,
            "count": collection.len(),
            "items": collection,
        }));
        return Ok(());
    }

    if collection.is_empty() {
        output.info(format!("No {} added yet", mode.noun()));
        return Ok(());
    }

    output.info(render_table(collection, mode).to_string());
    output.info(format!("{} {}", collection.len(), mode));
    Ok(())
}

pub(crate) fn render_table(collection: &Collection, mode: ViewMode) -> Table {
    let (first, second) = match mode {
        ViewMode::Movies => ("Director", "Genre"),
        ViewMode::Games => ("Developer", "Platform"),
    };

    let mut table = Table::new();
    table
        .load_preset(comfy_table::presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            ["ID", "Title", "Released", first, second, "Added"]
                .into_iter()
                .map(|h| Cell::new(h).fg(Color::Cyan).add_attribute(Attribute::Bold)),
        );

    for item in collection {
        let fields = item.details.labelled_fields();
        let field = |label: &str| {
            fields
                .iter()
                .find(|(l, _)| *l == label)
                .map(|(_, v)| v.to_string())
                .unwrap_or_default()
        };
        table.add_row(vec![
            Cell::new(item.id.as_str()),
            Cell::new(&item.title).add_attribute(Attribute::Bold),
            Cell::new(item.release_date.as_deref().unwrap_or("")),
            Cell::new(field(first)),
            Cell::new(field(second)),
            Cell::new(item.added_at.format("%Y-%m-%d").to_string()),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use media_track_models::{ItemId, MediaDetails, TrackedItem};

    #[test]
    fn test_table_shows_game_columns() {
        let collection = Collection::from_items(vec![TrackedItem {
            id: ItemId::from("1700000000000"),
            title: "Hades".to_string(),
            added_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            release_date: Some("2020".to_string()),
            details: MediaDetails::Game {
                developer: Some("Supergiant Games".to_string()),
                platform: None,
            },
        }]);

        let rendered = render_table(&collection, ViewMode::Games).to_string();
        assert!(rendered.contains("Developer"));
        assert!(rendered.contains("Supergiant Games"));
        assert!(rendered.contains("2024-03-01"));
        assert!(!rendered.contains("Director"));
    }
}
