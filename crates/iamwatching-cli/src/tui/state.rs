use media_track_core::FormField;
use media_track_models::ViewMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Search,
    Results,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Settings,
    Profile,
    Subscriptions,
    Theme,
}

impl MenuEntry {
    pub const ALL: [MenuEntry; 4] = [
        MenuEntry::Settings,
        MenuEntry::Profile,
        MenuEntry::Subscriptions,
        MenuEntry::Theme,
    ];
}

/// Cursor and focus state that only the terminal UI cares about.
#[derive(Debug, Default)]
pub struct ViewState {
    pub focus: Focus,
    pub list_cursor: usize,
    pub result_cursor: usize,
    pub menu_cursor: usize,
    pub field_index: usize,
    pub status: Option<String>,
    pub should_quit: bool,
}

impl ViewState {
    pub fn current_field(&self, mode: ViewMode) -> FormField {
        let fields = FormField::for_mode(mode);
        fields[self.field_index % fields.len()]
    }

    pub fn next_field(&mut self, mode: ViewMode) {
        let count = FormField::for_mode(mode).len();
        self.field_index = (self.field_index + 1) % count;
    }

    pub fn previous_field(&mut self, mode: ViewMode) {
        let count = FormField::for_mode(mode).len();
        self.field_index = (self.field_index + count - 1) % count;
    }

    pub fn menu_entry(&self) -> MenuEntry {
        MenuEntry::ALL[self.menu_cursor % MenuEntry::ALL.len()]
    }

    /// Keeps cursors inside lists whose length changed underneath them.
    pub fn clamp(&mut self, list_len: usize, result_len: usize) {
        self.list_cursor = self.list_cursor.min(list_len.saturating_sub(1));
        self.result_cursor = self.result_cursor.min(result_len.saturating_sub(1));
        if self.focus == Focus::Results && result_len == 0 {
            self.focus = Focus::Search;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_cycling_wraps() {
        let mut state = ViewState::default();
        state.previous_field(ViewMode::Games);
        assert_eq!(state.current_field(ViewMode::Games), FormField::Platform);
        state.next_field(ViewMode::Games);
        assert_eq!(state.current_field(ViewMode::Games), FormField::Title);
    }

    #[test]
    fn test_clamp_leaves_results_when_empty() {
        let mut state = ViewState {
            focus: Focus::Results,
            list_cursor: 4,
            result_cursor: 2,
            ..ViewState::default()
        };
        state.clamp(2, 0);
        assert_eq!(state.focus, Focus::Search);
        assert_eq!(state.list_cursor, 1);
        assert_eq!(state.result_cursor, 0);
    }
}
