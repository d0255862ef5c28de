use super::ResolvedConfig;

pub(super) fn print_summary(config: &ResolvedConfig) {
    print!("{}", render_summary(config));
}

pub(super) fn render_summary(config: &ResolvedConfig) -> String {
    let lines = [
        "Effective configuration:".to_string(),
        format!("  API: {}", config.base_url),
        format!("  Request timeout: {}s", config.timeout_secs),
        format!("  Section: {}", config.section),
        format!("  Page size: {}", config.page_size),
        format!("  Comments per thread: {}", config.comment_limit),
        format!("  Refresh interval: {}s", config.refresh_interval_secs),
        format!("  Auto-refresh on start: {}", bool_to_word(config.auto_refresh)),
        format!("  Persist session: {}", bool_to_word(config.persist_session)),
        format!("  Log level: {}", config.log_level),
        format!("  UI theme: {}", config.theme),
    ];
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn bool_to_word(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
