use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use throbber_widgets_tui::{Throbber, ThrobberState};

use crate::api::Section;
use crate::scheduler::RefreshStatus;
use crate::ui::theme::Theme;

/// What the left half of the status line reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Loading(Section),
    FetchingMore,
    Failed(String),
    Results { count: usize, query: String },
    Notice(String),
    Idle { count: usize },
}

impl StatusMessage {
    pub fn text(&self) -> String {
        match self {
            Self::Loading(section) => format!("Loading {section} stories..."),
            Self::FetchingMore => "Loading more stories...".to_string(),
            Self::Failed(error) => format!("{error}. Press r to try again"),
            Self::Results { count, query } => {
                let noun = if *count == 1 { "result" } else { "results" };
                format!("Found {count} {noun} for \"{query}\"")
            }
            Self::Notice(text) => text.clone(),
            Self::Idle { count } => format!("{count} stories"),
        }
    }

    fn is_busy(&self) -> bool {
        matches!(self, Self::Loading(_) | Self::FetchingMore)
    }
}

pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    message: &StatusMessage,
    refresh: RefreshStatus,
    throbber_state: &ThrobberState,
    theme: &Theme,
) {
    let timer = refresh_label(refresh);
    let [left, right] = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(timer.chars().count() as u16 + 1),
    ])
    .areas(area);

    let style = match message {
        StatusMessage::Failed(_) => theme.error,
        StatusMessage::Results { .. } => theme.prompt,
        _ => theme.muted,
    };
    let mut line = Line::default();
    if message.is_busy() {
        let spinner = Throbber::default().style(style).throbber_style(style);
        line.spans.push(spinner.to_symbol_span(throbber_state));
    }
    line.spans.push(Span::styled(message.text(), style));
    frame.render_widget(Paragraph::new(line), left);

    frame.render_widget(
        Paragraph::new(timer)
            .style(theme.muted)
            .alignment(ratatui::layout::Alignment::Right),
        right,
    );
}

fn refresh_label(status: RefreshStatus) -> String {
    if status.enabled {
        format!("Next: {}", status.next_refresh_in())
    } else {
        "Auto-refresh off".to_string()
    }
}
