use std::fmt::Write;

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use frontpage::app_dirs;

/// Version banner that also names the directories the reader uses.
pub(super) fn long_version() -> &'static str {
    let describe = |dir: anyhow::Result<std::path::PathBuf>| match dir {
        Ok(path) => path.display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };

    let mut details = format!("frontpage {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(details);
    let _ = writeln!(details, "config directory: {}", describe(app_dirs::get_config_dir()));
    let _ = writeln!(details, "data directory: {}", describe(app_dirs::get_data_dir()));
    let _ = write!(details, "session file: {}", describe(app_dirs::session_file()));

    Box::leak(details.into_boxed_str())
}

pub(super) fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::BrightBlack.on_default())
}
