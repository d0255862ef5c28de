use frontpage::logging;
use frontpage::scheduler::MAX_INTERVAL_SECS;
use frontpage::ui::theme;
use url::Url;

use super::{ConfigError, ConfigSources, ResolvedConfig};

pub(super) fn validate(config: &ResolvedConfig, sources: &ConfigSources) -> Result<(), ConfigError> {
    let positive = [
        ("feed.page_size", config.page_size as u64),
        ("feed.comment_limit", config.comment_limit as u64),
        ("refresh.interval_secs", config.refresh_interval_secs),
        ("api.timeout_secs", config.timeout_secs),
    ];
    for (key, value) in positive {
        if value == 0 {
            return Err(ConfigError::invalid(
                key,
                value.to_string(),
                sources.source_for(key),
                "must be at least 1",
            ));
        }
    }

    if config.refresh_interval_secs > MAX_INTERVAL_SECS {
        return Err(ConfigError::invalid(
            "refresh.interval_secs",
            config.refresh_interval_secs.to_string(),
            sources.source_for("refresh.interval_secs"),
            format!("must be at most {MAX_INTERVAL_SECS}"),
        ));
    }

    match Url::parse(&config.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(_) => {
            return Err(ConfigError::invalid(
                "api.base_url",
                config.base_url.clone(),
                sources.source_for("api.base_url"),
                "must use http or https",
            ));
        }
        Err(err) => {
            return Err(ConfigError::invalid(
                "api.base_url",
                config.base_url.clone(),
                sources.source_for("api.base_url"),
                err.to_string(),
            ));
        }
    }

    if theme::by_name(&config.theme).is_none() {
        let known: Vec<&str> = theme::names().collect();
        return Err(ConfigError::invalid(
            "ui.theme",
            config.theme.clone(),
            sources.source_for("ui.theme"),
            format!("unknown theme, expected one of {}", known.join(", ")),
        ));
    }

    if !logging::is_valid_level(&config.log_level) {
        return Err(ConfigError::invalid(
            "log.level",
            config.log_level.clone(),
            sources.source_for("log.level"),
            "not a valid log filter",
        ));
    }

    Ok(())
}
