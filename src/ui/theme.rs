use ratatui::style::{Color, Modifier, Style};

/// Styles for the reader's widgets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Tab bar and table headers.
    pub header: Style,
    /// Selected row.
    pub row_highlight: Style,
    /// Prompt text and the search input label.
    pub prompt: Style,
    /// Placeholder text for empty lists.
    pub empty: Style,
    /// Matches, favorites and vote markers.
    pub highlight: Style,
    /// Secondary metadata such as author and age.
    pub muted: Style,
    /// Error banners.
    pub error: Style,
}

impl Theme {
    #[must_use]
    pub fn tab_inactive_style(&self) -> Style {
        Style::new().fg(self.header.fg.unwrap_or(Color::Reset))
    }

    #[must_use]
    pub fn tab_highlight_style(&self) -> Style {
        self.header.add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        SLATE
    }
}

pub const SLATE: Theme = Theme {
    header: Style::new()
        .fg(Color::Rgb(226, 232, 240))
        .bg(Color::Rgb(15, 23, 42)),
    row_highlight: Style::new()
        .bg(Color::Rgb(30, 41, 59))
        .fg(Color::Rgb(250, 204, 21)),
    prompt: Style::new().fg(Color::LightCyan),
    empty: Style::new().fg(Color::DarkGray),
    highlight: Style::new()
        .fg(Color::Rgb(255, 102, 0))
        .add_modifier(Modifier::BOLD),
    muted: Style::new().fg(Color::Gray),
    error: Style::new().fg(Color::LightRed).add_modifier(Modifier::BOLD),
};

pub const LIGHT: Theme = Theme {
    header: Style::new()
        .fg(Color::Rgb(15, 23, 42))
        .bg(Color::Rgb(246, 246, 239)),
    row_highlight: Style::new()
        .bg(Color::Rgb(220, 220, 210))
        .fg(Color::Rgb(120, 60, 0)),
    prompt: Style::new().fg(Color::Rgb(0, 102, 153)),
    empty: Style::new().fg(Color::Rgb(100, 100, 100)),
    highlight: Style::new()
        .fg(Color::Rgb(255, 102, 0))
        .add_modifier(Modifier::BOLD),
    muted: Style::new().fg(Color::Rgb(130, 130, 130)),
    error: Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
};

const BUILTINS: &[(&str, &[&str], Theme)] = &[
    ("slate", &["default", "dark"], SLATE),
    ("light", &["paper"], LIGHT),
];

/// Canonical names of the bundled themes.
pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|(name, _, _)| *name)
}

/// Look up a theme by name or alias, ignoring case and surrounding space.
pub fn by_name(name: &str) -> Option<Theme> {
    let normalized = normalize_name(name);
    BUILTINS
        .iter()
        .find(|(canonical, aliases, _)| {
            *canonical == normalized || aliases.contains(&normalized.as_str())
        })
        .map(|(_, _, theme)| *theme)
}

fn normalize_name(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}
