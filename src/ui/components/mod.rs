//! Widgets drawn by the reader.

pub mod overlays;
pub mod status;
pub mod stories;
pub mod tabs;

pub use overlays::{render_favorites, render_login, render_profile, render_thread};
pub use status::{StatusMessage, render_status};
pub use stories::{StoryTable, render_story_table};
pub use tabs::{render_search_row, render_section_tabs};
