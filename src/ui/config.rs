use crate::api::{COMMENT_LIMIT, Section};
use crate::feed::PAGE_SIZE;
use crate::scheduler::DEFAULT_INTERVAL_SECS;

use super::theme::Theme;

/// Startup options for the reader UI.
#[derive(Debug, Clone)]
pub struct UiConfig {
    pub section: Section,
    pub page_size: usize,
    pub comment_limit: usize,
    pub refresh_interval_secs: u64,
    /// Enable the auto-refresh timer as soon as the UI starts.
    pub auto_refresh: bool,
    pub theme: Theme,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            section: Section::default(),
            page_size: PAGE_SIZE,
            comment_limit: COMMENT_LIMIT,
            refresh_interval_secs: DEFAULT_INTERVAL_SECS,
            auto_refresh: false,
            theme: Theme::default(),
        }
    }
}
