use serde::Deserialize;

use crate::cli::CliArgs;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct ApiSection {
    pub(super) base_url: Option<String>,
    pub(super) timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct FeedSection {
    pub(super) section: Option<String>,
    pub(super) page_size: Option<usize>,
    pub(super) comment_limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RefreshSection {
    pub(super) interval_secs: Option<u64>,
    pub(super) auto_start: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SessionSection {
    pub(super) persist: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct LogSection {
    pub(super) level: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct UiSection {
    pub(super) theme: Option<String>,
}

impl ApiSection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(base_url) = cli.base_url.clone() {
            self.base_url = Some(base_url);
        }
    }
}

impl FeedSection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(section) = cli.section {
            self.section = Some(section.as_str().to_string());
        }
        if let Some(page_size) = cli.page_size {
            self.page_size = Some(page_size);
        }
    }
}

impl RefreshSection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(interval) = cli.interval {
            self.interval_secs = Some(interval);
        }
        if cli.auto_refresh {
            self.auto_start = Some(true);
        }
    }
}

impl SessionSection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if cli.no_persist {
            self.persist = Some(false);
        }
    }
}

impl UiSection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(theme) = cli.theme.clone() {
            self.theme = Some(theme);
        }
    }
}
