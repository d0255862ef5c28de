use clap::Parser;
use frontpage::Section;

use super::RawConfig;
use crate::cli::CliArgs;

#[test]
fn cli_overrides_take_precedence() {
    let cli = CliArgs::parse_from([
        "frontpage",
        "--section",
        "show",
        "--page-size",
        "12",
        "--interval",
        "90",
        "--auto-refresh",
        "--base-url",
        "http://localhost:8080/v0",
        "--theme",
        "light",
        "--no-persist",
    ]);

    let mut config = RawConfig::default();
    config.feed.section = Some("top".into());
    config.refresh.auto_start = Some(false);
    config.apply_cli_overrides(&cli);

    assert_eq!(config.feed.section.as_deref(), Some("show"));
    assert_eq!(config.feed.page_size, Some(12));
    assert_eq!(config.refresh.interval_secs, Some(90));
    assert_eq!(config.refresh.auto_start, Some(true));
    assert_eq!(config.api.base_url.as_deref(), Some("http://localhost:8080/v0"));
    assert_eq!(config.ui.theme.as_deref(), Some("light"));
    assert_eq!(config.session.persist, Some(false));
}

#[test]
fn absent_flags_keep_file_values() {
    let cli = CliArgs::parse_from(["frontpage"]);
    let mut config = RawConfig::default();
    config.refresh.auto_start = Some(true);
    config.session.persist = Some(true);
    config.apply_cli_overrides(&cli);

    assert_eq!(config.refresh.auto_start, Some(true));
    assert_eq!(config.session.persist, Some(true));
}

#[test]
fn resolve_fills_defaults() {
    let cli = CliArgs::parse_from(["frontpage"]);
    let resolved = RawConfig::default().resolve(&cli).unwrap();

    assert_eq!(resolved.base_url, "https://hacker-news.firebaseio.com/v0");
    assert_eq!(resolved.timeout_secs, 10);
    assert_eq!(resolved.section, Section::Top);
    assert_eq!(resolved.page_size, 30);
    assert_eq!(resolved.comment_limit, 20);
    assert_eq!(resolved.refresh_interval_secs, 300);
    assert!(!resolved.auto_refresh);
    assert!(resolved.persist_session);
    assert_eq!(resolved.log_level, "info");
    assert_eq!(resolved.theme, "default");
}

#[test]
fn unknown_section_in_file_is_rejected() {
    let cli = CliArgs::parse_from(["frontpage"]);
    let mut config = RawConfig::default();
    config.feed.section = Some("best".into());

    let message = config.resolve(&cli).unwrap_err().to_string();
    assert!(message.contains("feed.section"), "{message}");
    assert!(message.contains("value: best"), "{message}");
}

#[test]
fn flag_origin_is_reported() {
    let cli = CliArgs::parse_from(["frontpage", "--interval", "0"]);
    let mut config = RawConfig::default();
    config.apply_cli_overrides(&cli);

    let message = config.resolve(&cli).unwrap_err().to_string();
    assert!(message.contains("CLI flag `--interval`"), "{message}");
}
