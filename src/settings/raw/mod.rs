use std::env;

use anyhow::{Error, Result};
use frontpage::Section;
use frontpage::api::{COMMENT_LIMIT, DEFAULT_BASE_URL};
use frontpage::feed::PAGE_SIZE;
use frontpage::scheduler::DEFAULT_INTERVAL_SECS;
use serde::Deserialize;

use crate::cli::CliArgs;

use super::resolved::{ConfigError, ConfigSources, ResolvedConfig, SettingSource};

mod sections;

use sections::{ApiSection, FeedSection, LogSection, RefreshSection, SessionSection, UiSection};

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_THEME: &str = "default";

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
    api: ApiSection,
    feed: FeedSection,
    refresh: RefreshSection,
    session: SessionSection,
    log: LogSection,
    ui: UiSection,
}

impl RawConfig {
    /// Apply CLI overrides on top of the raw configuration values.
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        self.api.apply_cli_overrides(cli);
        self.feed.apply_cli_overrides(cli);
        self.refresh.apply_cli_overrides(cli);
        self.session.apply_cli_overrides(cli);
        self.ui.apply_cli_overrides(cli);
    }

    /// Convert the raw configuration into a [`ResolvedConfig`], validating and
    /// filling defaults where required.
    pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
        let sources = self.sources(cli);

        let section = match self.feed.section.as_deref() {
            Some(raw) => raw.parse::<Section>().map_err(|err| {
                ConfigError::invalid(
                    "feed.section",
                    raw,
                    sources.source_for("feed.section"),
                    err.to_string(),
                )
            })?,
            None => Section::default(),
        };

        let config = ResolvedConfig {
            base_url: self.api.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout_secs: self.api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            section,
            page_size: self.feed.page_size.unwrap_or(PAGE_SIZE),
            comment_limit: self.feed.comment_limit.unwrap_or(COMMENT_LIMIT),
            refresh_interval_secs: self.refresh.interval_secs.unwrap_or(DEFAULT_INTERVAL_SECS),
            auto_refresh: self.refresh.auto_start.unwrap_or(false),
            persist_session: self.session.persist.unwrap_or(true),
            log_level: self.log.level.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            theme: self.ui.theme.unwrap_or_else(|| DEFAULT_THEME.to_string()),
        };

        config.validate(&sources).map_err(Error::new)?;

        Ok(config)
    }

    fn sources(&self, cli: &CliArgs) -> ConfigSources {
        let mut sources = ConfigSources::default();
        sources.record(
            "api.base_url",
            detect_source(
                cli.base_url.is_some().then_some("--base-url"),
                self.api.base_url.is_some(),
                "FRONTPAGE__API__BASE_URL",
                "api.base_url",
            ),
        );
        sources.record(
            "api.timeout_secs",
            detect_source(
                None,
                self.api.timeout_secs.is_some(),
                "FRONTPAGE__API__TIMEOUT_SECS",
                "api.timeout_secs",
            ),
        );
        sources.record(
            "feed.section",
            detect_source(
                cli.section.is_some().then_some("--section"),
                self.feed.section.is_some(),
                "FRONTPAGE__FEED__SECTION",
                "feed.section",
            ),
        );
        sources.record(
            "feed.page_size",
            detect_source(
                cli.page_size.is_some().then_some("--page-size"),
                self.feed.page_size.is_some(),
                "FRONTPAGE__FEED__PAGE_SIZE",
                "feed.page_size",
            ),
        );
        sources.record(
            "feed.comment_limit",
            detect_source(
                None,
                self.feed.comment_limit.is_some(),
                "FRONTPAGE__FEED__COMMENT_LIMIT",
                "feed.comment_limit",
            ),
        );
        sources.record(
            "refresh.interval_secs",
            detect_source(
                cli.interval.is_some().then_some("--interval"),
                self.refresh.interval_secs.is_some(),
                "FRONTPAGE__REFRESH__INTERVAL_SECS",
                "refresh.interval_secs",
            ),
        );
        sources.record(
            "log.level",
            detect_source(
                None,
                self.log.level.is_some(),
                "FRONTPAGE__LOG__LEVEL",
                "log.level",
            ),
        );
        sources.record(
            "ui.theme",
            detect_source(
                cli.theme.is_some().then_some("--theme"),
                self.ui.theme.is_some(),
                "FRONTPAGE__UI__THEME",
                "ui.theme",
            ),
        );
        sources
    }
}

/// `cli_flag` is the flag name when the value came from the command line.
fn detect_source(
    cli_flag: Option<&'static str>,
    value_present: bool,
    env_var: &'static str,
    key: &'static str,
) -> Option<SettingSource> {
    if !value_present {
        return None;
    }

    if let Some(flag) = cli_flag {
        return Some(SettingSource::CliFlag(flag));
    }

    if env::var_os(env_var).is_some() {
        return Some(SettingSource::Environment(env_var));
    }

    Some(SettingSource::ConfigKey(key))
}

#[cfg(test)]
mod tests;
