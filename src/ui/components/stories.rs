use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, HighlightSpacing, Paragraph, Row, Table, TableState};

use crate::api::Item;
use crate::format;
use crate::session::Session;
use crate::ui::theme::Theme;

const HIGHLIGHT_SYMBOL: &str = "▶ ";

/// Inputs for one render of the story table.
pub struct StoryTable<'a> {
    pub stories: &'a [Item],
    /// Active search text; matching title fragments are highlighted.
    pub query: &'a str,
    pub session: &'a Session,
    pub now: i64,
    /// Message drawn when there are no rows.
    pub empty_message: &'a str,
}

pub fn render_story_table(
    frame: &mut Frame,
    area: Rect,
    table_state: &mut TableState,
    table: StoryTable<'_>,
    theme: &Theme,
) {
    let header = Row::new(["#", "", "Title", "Points", "By", "Age", "Comments"])
        .style(theme.header);
    let rows: Vec<Row> = table
        .stories
        .iter()
        .enumerate()
        .map(|(index, story)| story_row(index, story, &table, theme))
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Length(2),
        Constraint::Min(20),
        Constraint::Length(6),
        Constraint::Length(15),
        Constraint::Length(15),
        Constraint::Length(8),
    ];
    let widget = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .row_highlight_style(theme.row_highlight)
        .highlight_symbol(HIGHLIGHT_SYMBOL)
        .highlight_spacing(HighlightSpacing::Always);
    frame.render_stateful_widget(widget, area, table_state);

    if table.stories.is_empty() && area.height > 2 {
        let message_area = Rect {
            y: area.y + 2,
            height: area.height - 2,
            ..area
        };
        let empty = Paragraph::new(table.empty_message)
            .alignment(Alignment::Center)
            .style(theme.empty);
        frame.render_widget(empty, message_area);
    }
}

fn story_row<'a>(index: usize, story: &'a Item, table: &StoryTable<'_>, theme: &Theme) -> Row<'a> {
    let marks = format!(
        "{}{}",
        if table.session.has_voted(story.id) { "▲" } else { " " },
        if table.session.is_favorite(story.id) { "★" } else { " " },
    );

    let mut title = highlight_matches(&story.title, table.query, theme.highlight);
    if let Some(url) = story.url.as_deref() {
        let host = format::hostname(url);
        if !host.is_empty() {
            title.spans.push(Span::styled(format!(" ({host})"), theme.muted));
        }
    }

    Row::new(vec![
        Cell::from(format!("{}.", index + 1)).style(theme.muted),
        Cell::from(marks).style(theme.highlight),
        Cell::from(title),
        Cell::from(story.score.to_string()),
        Cell::from(story.by.clone()).style(theme.muted),
        Cell::from(format::time_ago(story.time, table.now)).style(theme.muted),
        Cell::from(story.descendants.to_string()),
    ])
}

/// Split `text` into spans, styling case-insensitive occurrences of `query`.
pub(crate) fn highlight_matches(text: &str, query: &str, style: Style) -> Line<'static> {
    if query.is_empty() {
        return Line::from(text.to_string());
    }
    let haystack = text.to_lowercase();
    let needle = query.to_lowercase();
    // Lowercasing can change byte lengths; only highlight when offsets line up.
    if haystack.len() != text.len() {
        return Line::from(text.to_string());
    }

    let mut spans = Vec::new();
    let mut cursor = 0;
    for (start, _) in haystack.match_indices(&needle) {
        if start < cursor {
            continue;
        }
        if start > cursor {
            spans.push(Span::raw(text[cursor..start].to_string()));
        }
        let end = start + needle.len();
        spans.push(Span::styled(text[start..end].to_string(), style));
        cursor = end;
    }
    if cursor < text.len() {
        spans.push(Span::raw(text[cursor..].to_string()));
    }
    Line::from(spans)
}
