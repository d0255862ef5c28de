use clap::ValueEnum;
use frontpage::Section;

/// Story sections selectable from the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum SectionArg {
    Top,
    New,
    Ask,
    Show,
    Jobs,
}

impl SectionArg {
    /// Return the key consumed by configuration loading.
    pub(crate) fn as_str(self) -> &'static str {
        Section::from(self).key()
    }
}

impl From<SectionArg> for Section {
    fn from(arg: SectionArg) -> Self {
        match arg {
            SectionArg::Top => Section::Top,
            SectionArg::New => Section::New,
            SectionArg::Ask => Section::Ask,
            SectionArg::Show => Section::Show,
            SectionArg::Jobs => Section::Jobs,
        }
    }
}

/// Output formats for `--once`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Plain,
    Json,
}
