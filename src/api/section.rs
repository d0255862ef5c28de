use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::ApiError;

/// One of the story categories published by the content API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Top,
    New,
    Ask,
    Show,
    Jobs,
}

impl Section {
    /// Every section in tab order.
    pub const ALL: [Section; 5] = [
        Section::Top,
        Section::New,
        Section::Ask,
        Section::Show,
        Section::Jobs,
    ];

    /// Short identifier used in configuration and messages.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Section::Top => "top",
            Section::New => "new",
            Section::Ask => "ask",
            Section::Show => "show",
            Section::Jobs => "jobs",
        }
    }

    /// Label shown in the tab bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Section::Top => "Top",
            Section::New => "New",
            Section::Ask => "Ask",
            Section::Show => "Show",
            Section::Jobs => "Jobs",
        }
    }

    /// Path segment of the id listing endpoint, without the `.json` suffix.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Section::Top => "topstories",
            Section::New => "newstories",
            Section::Ask => "askstories",
            Section::Show => "showstories",
            Section::Jobs => "jobstories",
        }
    }

    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|section| *section == self)
            .unwrap_or(0)
    }

    /// The section after this one, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The section before this one, wrapping around.
    #[must_use]
    pub fn previous(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.index() + len - 1) % len]
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Section {
    type Err = ApiError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|section| section.key() == value)
            .ok_or(ApiError::UnknownSection(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_case_insensitively() {
        assert_eq!("Ask".parse::<Section>().unwrap(), Section::Ask);
        assert_eq!(" jobs ".parse::<Section>().unwrap(), Section::Jobs);
        assert!("best".parse::<Section>().is_err());
    }

    #[test]
    fn next_and_previous_wrap() {
        assert_eq!(Section::Jobs.next(), Section::Top);
        assert_eq!(Section::Top.previous(), Section::Jobs);
        assert_eq!(Section::New.next().previous(), Section::New);
    }
}
