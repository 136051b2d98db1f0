use serde::{Deserialize, Serialize};

use crate::view_mode::ViewMode;

/// Mode-specific fields of a catalog search hit. Missing values are empty strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResultDetails {
    Movie { director: String, genre: String },
    Game { developer: String, platform: String },
}

impl ResultDetails {
    pub fn view_mode(&self) -> ViewMode {
        match self {
            ResultDetails::Movie { .. } => ViewMode::Movies,
            ResultDetails::Game { .. } => ViewMode::Games,
        }
    }
}

/// Normalized catalog search hit. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    /// Identifier in the external catalog.
    pub external_id: String,
    pub title: String,
    pub release_date: String,
    #[serde(flatten)]
    pub details: ResultDetails,
}

impl SearchResult {
    /// Secondary line shown under the title in the results dropdown,
    /// e.g. `2021 • Science Fiction` or `2020 • PC, PlayStation 5`.
    pub fn subtitle(&self) -> String {
        let extra = match &self.details {
            ResultDetails::Movie { genre, .. } => genre,
            ResultDetails::Game { platform, .. } => platform,
        };
        match (self.release_date.is_empty(), extra.is_empty()) {
            (false, false) => format!("{} • {}", self.release_date, extra),
            (false, true) => self.release_date.clone(),
            (true, false) => extra.clone(),
            (true, true) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtitle_per_mode() {
        let movie = SearchResult {
            external_id: "438631".to_string(),
            title: "Dune".to_string(),
            release_date: "2021".to_string(),
            details: ResultDetails::Movie {
                director: String::new(),
                genre: "Science Fiction".to_string(),
            },
        };
        assert_eq!(movie.subtitle(), "2021 • Science Fiction");

        let game = SearchResult {
            external_id: "3498".to_string(),
            title: "Grand Theft Auto V".to_string(),
            release_date: String::new(),
            details: ResultDetails::Game {
                developer: "Rockstar North".to_string(),
                platform: String::new(),
            },
        };
        assert_eq!(game.subtitle(), "");
        assert_eq!(game.details.view_mode(), ViewMode::Games);
    }

    #[test]
    fn test_subtitle_without_year_has_no_separator() {
        let game = SearchResult {
            external_id: "327239".to_string(),
            title: "Hades II".to_string(),
            release_date: String::new(),
            details: ResultDetails::Game {
                developer: String::new(),
                platform: "PC".to_string(),
            },
        };
        assert_eq!(game.subtitle(), "PC");
    }
}
