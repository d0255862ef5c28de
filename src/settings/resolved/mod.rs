use std::time::Duration;

use frontpage::{Section, UiConfig};
use frontpage::ui::theme;

mod errors;
mod sources;
mod summary;
mod validation;

pub(crate) use errors::ConfigError;
pub(crate) use sources::{ConfigSources, SettingSource};

/// Application-ready configuration derived from user input, config files and
/// defaults.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub section: Section,
    pub page_size: usize,
    pub comment_limit: usize,
    pub refresh_interval_secs: u64,
    pub auto_refresh: bool,
    pub persist_session: bool,
    pub log_level: String,
    pub theme: String,
}

impl ResolvedConfig {
    pub(super) fn validate(&self, sources: &ConfigSources) -> Result<(), ConfigError> {
        validation::validate(self, sources)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Startup options for the reader. The theme name has already been
    /// validated, so an unknown name cannot reach this point.
    pub fn ui_config(&self) -> UiConfig {
        UiConfig {
            section: self.section,
            page_size: self.page_size,
            comment_limit: self.comment_limit,
            refresh_interval_secs: self.refresh_interval_secs,
            auto_refresh: self.auto_refresh,
            theme: theme::by_name(&self.theme).unwrap_or_default(),
        }
    }

    /// Print a human readable summary of the effective configuration.
    pub fn print_summary(&self) {
        summary::print_summary(self);
    }
}

#[cfg(test)]
impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            base_url: frontpage::api::DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            section: Section::Top,
            page_size: 30,
            comment_limit: 20,
            refresh_interval_secs: 300,
            auto_refresh: false,
            persist_session: true,
            log_level: "info".to_string(),
            theme: "default".to_string(),
        }
    }
}
