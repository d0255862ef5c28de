use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Tabs};
use unicode_width::UnicodeWidthStr;

use crate::api::Section;
use crate::session::UserRecord;
use crate::ui::input::LineInput;
use crate::ui::theme::Theme;

const BRAND: &str = " frontpage ";

/// Render the section tabs with the account badge at the right.
pub fn render_section_tabs(
    frame: &mut Frame,
    area: Rect,
    current: Section,
    user: Option<&UserRecord>,
    theme: &Theme,
) {
    frame.render_widget(Paragraph::new("").style(theme.header), area);

    let badge = account_badge(user);
    let [brand_area, tabs_area, badge_area] = Layout::horizontal([
        Constraint::Length(BRAND.width() as u16),
        Constraint::Min(1),
        Constraint::Length(badge.width() as u16 + 1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(BRAND).style(theme.tab_highlight_style()),
        brand_area,
    );

    let tabs = Tabs::new(build_tab_titles(theme, current))
        .select(current.index())
        .divider("|")
        .padding("", "")
        .style(theme.header)
        .highlight_style(theme.tab_highlight_style());
    frame.render_widget(tabs, tabs_area);

    frame.render_widget(
        Paragraph::new(badge)
            .style(theme.header)
            .alignment(ratatui::layout::Alignment::Right),
        badge_area,
    );
}

/// Render the search prompt and input field.
pub fn render_search_row(
    frame: &mut Frame,
    area: Rect,
    input: &LineInput<'_>,
    focused: bool,
    theme: &Theme,
) {
    let prompt = if focused { "search > " } else { "search   " };
    let [prompt_area, input_area] =
        Layout::horizontal([Constraint::Length(prompt.width() as u16), Constraint::Min(1)])
            .areas(area);
    frame.render_widget(Paragraph::new(prompt).style(theme.prompt), prompt_area);
    input.render(frame, input_area);
}

fn build_tab_titles(theme: &Theme, current: Section) -> Vec<Line<'static>> {
    let inactive = theme.tab_inactive_style();
    Section::ALL
        .iter()
        .enumerate()
        .map(|(index, section)| {
            let label = format!(" {} {} ", index + 1, section.label());
            let style = if *section == current {
                theme.tab_highlight_style()
            } else {
                inactive
            };
            Line::from(Span::styled(label, style))
        })
        .collect()
}

fn account_badge(user: Option<&UserRecord>) -> String {
    match user {
        Some(user) => format!("{} ({})", user.username, user.karma),
        None => "L to log in".to_string(),
    }
}
