use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser};

use super::options::{OutputFormat, SectionArg};
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `frontpage` binary.
#[derive(Parser, Debug)]
#[command(
    name = "frontpage",
    version,
    long_version = long_version(),
    about = "Terminal reader for Hacker News",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
pub(crate) struct CliArgs {
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "FRONTPAGE_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        short = 's',
        long,
        value_enum,
        help = "Section to open on start (default: top)"
    )]
    pub(crate) section: Option<SectionArg>,
    #[arg(
        long = "page-size",
        value_name = "NUM",
        help = "Stories requested per page (default: 30)"
    )]
    pub(crate) page_size: Option<usize>,
    #[arg(
        short = 'i',
        long = "interval",
        value_name = "SECONDS",
        help = "Seconds between automatic refreshes (default: 300)"
    )]
    pub(crate) interval: Option<u64>,
    #[arg(
        short = 'a',
        long = "auto-refresh",
        help = "Start with auto-refresh enabled (default: disabled)"
    )]
    pub(crate) auto_refresh: bool,
    #[arg(
        long = "base-url",
        value_name = "URL",
        help = "Root of the content API (default: https://hacker-news.firebaseio.com/v0)"
    )]
    pub(crate) base_url: Option<String>,
    #[arg(
        long,
        value_name = "THEME",
        help = "Select a theme by name (default: slate)"
    )]
    pub(crate) theme: Option<String>,
    #[arg(
        long = "no-persist",
        help = "Keep the session in memory only (default: disabled)"
    )]
    pub(crate) no_persist: bool,
    #[arg(
        short = 'p',
        long = "print-config",
        help = "Print the resolved configuration before running (default: disabled)"
    )]
    pub(crate) print_config: bool,
    #[arg(
        short = 'l',
        long = "list-themes",
        help = "List supported themes and exit (default: disabled)"
    )]
    pub(crate) list_themes: bool,
    #[arg(
        long,
        help = "Print the first page of the section and exit instead of opening the reader (default: disabled)"
    )]
    pub(crate) once: bool,
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t = OutputFormat::Plain,
        help = "How to print stories with --once"
    )]
    pub(crate) output: OutputFormat,
}
