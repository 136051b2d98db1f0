pub mod collection;
pub mod item;
pub mod search;
pub mod theme;
pub mod view_mode;

pub use collection::Collection;
pub use item::{ItemId, MediaDetails, TrackedItem};
pub use search::{ResultDetails, SearchResult};
pub use theme::Theme;
pub use view_mode::ViewMode;
