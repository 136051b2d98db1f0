use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two tracked domains is active.
///
/// The view mode selects the collection shown, the catalog endpoint used for
/// search and the form fields offered when adding an item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Movies,
    Games,
}

impl ViewMode {
    pub fn toggle(self) -> Self {
        match self {
            ViewMode::Movies => ViewMode::Games,
            ViewMode::Games => ViewMode::Movies,
        }
    }

    /// Short label used on the mode switch ("Movies" / "Games").
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Movies => "Movies",
            ViewMode::Games => "Games",
        }
    }

    /// Plural noun used in placeholders and empty-list messages.
    pub fn noun(self) -> &'static str {
        match self {
            ViewMode::Movies => "movies or shows",
            ViewMode::Games => "games",
        }
    }

    /// Singular noun used in the add form title.
    pub fn item_label(self) -> &'static str {
        match self {
            ViewMode::Movies => "Movie/Show",
            ViewMode::Games => "Game",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Movies => write!(f, "movies"),
            ViewMode::Games => write!(f, "games"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trips() {
        assert_eq!(ViewMode::Movies.toggle(), ViewMode::Games);
        assert_eq!(ViewMode::Games.toggle(), ViewMode::Movies);
        assert_eq!(ViewMode::Movies.toggle().toggle(), ViewMode::Movies);
    }

    #[test]
    fn test_nouns() {
        assert_eq!(ViewMode::Movies.noun(), "movies or shows");
        assert_eq!(ViewMode::Games.item_label(), "Game");
        assert_eq!(ViewMode::Games.to_string(), "games");
    }
}
