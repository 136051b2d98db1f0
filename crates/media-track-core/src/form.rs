use chrono::{DateTime, Utc};
use media_track_models::{ItemId, MediaDetails, ResultDetails, SearchResult, TrackedItem, ViewMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    ReleaseDate,
    Director,
    Genre,
    Developer,
    Platform,
}

const MOVIE_FIELDS: [FormField; 4] = [
    FormField::Title,
    FormField::ReleaseDate,
    FormField::Director,
    FormField::Genre,
];

const GAME_FIELDS: [FormField; 4] = [
    FormField::Title,
    FormField::ReleaseDate,
    FormField::Developer,
    FormField::Platform,
];

impl FormField {
    /// Fields offered by the add form in `mode`, in tab order.
    pub fn for_mode(mode: ViewMode) -> &'static [FormField] {
        match mode {
            ViewMode::Movies => &MOVIE_FIELDS,
            ViewMode::Games => &GAME_FIELDS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title*",
            FormField::ReleaseDate => "Release Date",
            FormField::Director => "Director",
            FormField::Genre => "Genre",
            FormField::Developer => "Developer",
            FormField::Platform => "Platform",
        }
    }
}

/// Transient fields of the add-item form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddForm {
    pub title: String,
    pub release_date: String,
    pub director: String,
    pub genre: String,
    pub developer: String,
    pub platform: String,
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl AddForm {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::ReleaseDate => &self.release_date,
            FormField::Director => &self.director,
            FormField::Genre => &self.genre,
            FormField::Developer => &self.developer,
            FormField::Platform => &self.platform,
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        let slot = match field {
            FormField::Title => &mut self.title,
            FormField::ReleaseDate => &mut self.release_date,
            FormField::Director => &mut self.director,
            FormField::Genre => &mut self.genre,
            FormField::Developer => &mut self.developer,
            FormField::Platform => &mut self.platform,
        };
        *slot = value;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Replaces the form with a search hit, copying only the fields that
    /// belong to `mode`.
    pub fn populate_from(&mut self, result: &SearchResult, mode: ViewMode) {
        self.clear();
        self.title = result.title.clone();
        self.release_date = result.release_date.clone();
        match (&result.details, mode) {
            (ResultDetails::Movie { director, genre }, ViewMode::Movies) => {
                self.director = director.clone();
                self.genre = genre.clone();
            }
            (ResultDetails::Game { developer, platform }, ViewMode::Games) => {
                self.developer = developer.clone();
                self.platform = platform.clone();
            }
            _ => {}
        }
    }

    /// The item this form describes, or `None` when the trimmed title is empty.
    pub fn build_item(&self, mode: ViewMode, id: ItemId, now: DateTime<Utc>) -> Option<TrackedItem> {
        let title = optional(&self.title)?;
        let details = match mode {
            ViewMode::Movies => MediaDetails::Movie {
                director: optional(&self.director),
                genre: optional(&self.genre),
            },
            ViewMode::Games => MediaDetails::Game {
                developer: optional(&self.developer),
                platform: optional(&self.platform),
            },
        };
        Some(TrackedItem {
            id,
            title,
            added_at: now,
            release_date: optional(&self.release_date),
            details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_result() -> SearchResult {
        SearchResult {
            external_id: "1".to_string(),
            title: "Portal 2".to_string(),
            release_date: "2011".to_string(),
            details: ResultDetails::Game {
                developer: "Valve".to_string(),
                platform: "PC, macOS".to_string(),
            },
        }
    }

    #[test]
    fn test_populate_copies_mode_fields_only() {
        let mut form = AddForm { director: "stale".to_string(), ..AddForm::default() };
        form.populate_from(&game_result(), ViewMode::Games);

        assert_eq!(form.title, "Portal 2");
        assert_eq!(form.release_date, "2011");
        assert_eq!(form.developer, "Valve");
        assert_eq!(form.platform, "PC, macOS");
        assert_eq!(form.director, "");
        assert_eq!(form.genre, "");
    }

    #[test]
    fn test_build_item_trims_and_drops_empty_fields() {
        let form = AddForm {
            title: "  Dune ".to_string(),
            genre: "   ".to_string(),
            developer: "ignored in movie mode".to_string(),
            ..AddForm::default()
        };
        let item = form
            .build_item(ViewMode::Movies, ItemId::from("1"), Utc::now())
            .unwrap();
        assert_eq!(item.title, "Dune");
        assert_eq!(item.release_date, None);
        assert_eq!(item.details, MediaDetails::Movie { director: None, genre: None });
    }

    #[test]
    fn test_blank_title_builds_nothing() {
        let form = AddForm { title: " \t ".to_string(), ..AddForm::default() };
        assert!(form.build_item(ViewMode::Games, ItemId::from("1"), Utc::now()).is_none());
    }

    #[test]
    fn test_fields_per_mode() {
        assert!(FormField::for_mode(ViewMode::Movies).contains(&FormField::Director));
        assert!(!FormField::for_mode(ViewMode::Movies).contains(&FormField::Platform));
        assert_eq!(FormField::for_mode(ViewMode::Games)[0], FormField::Title);
    }
}
